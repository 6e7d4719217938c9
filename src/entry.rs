//! `serialize` / `deserialize`: one linear pass over a list of fields.

use crate::{Buffer, ByteCursor, ByteReader, Field, Result};

/// Encode `fields` into `mem` starting at `pos`, returning the next position.
///
/// Fields are appended in order with no tags between them. When `pos` is 0
/// the call is the outermost one and a resizable buffer is set to exactly the
/// encoded length afterwards. Calls at any other position leave the length
/// alone, so encoding a second record behind a first never truncates the
/// buffer. Fixed views are never resized and fail with
/// [`BytesError::BufferTooSmall`](crate::BytesError::BufferTooSmall) when
/// full.
///
/// ```
/// use fieldcast::serialize;
///
/// let (mut a, mut b) = (1u16, String::from("hi"));
/// let mut buf = vec![0xFF; 64];
/// let end = serialize(&mut buf, 0, &mut [&mut a, &mut b]).unwrap();
/// assert_eq!(end, 2 + 8 + 2);
/// assert_eq!(buf.len(), end);
/// ```
pub fn serialize<B: Buffer>(mem: &mut B, pos: usize, fields: &mut [&mut dyn Field]) -> Result<usize> {
    encode_with(mem, pos, |cursor| cursor.write_fields(fields).map(drop))
}

/// Decode `fields` from `mem` starting at `pos`, returning the next position.
///
/// Each field is replaced in order. Nullable pointer fields release their
/// current value before the replacement is decoded.
pub fn deserialize(mem: &[u8], pos: usize, fields: &mut [&mut dyn Field]) -> Result<usize> {
    decode_with(mem, pos, |reader| reader.read_fields(fields).map(drop))
}

/// Run an encode pass and apply the top-level sizing rule.
pub(crate) fn encode_with<B, F>(mem: &mut B, pos: usize, body: F) -> Result<usize>
where
    B: Buffer,
    F: FnOnce(&mut ByteCursor<'_>) -> Result<()>,
{
    let top_level = pos == 0;
    log::trace!(target: "fieldcast", "serialize from {pos}");

    let end = {
        let mut cursor = ByteCursor::new(&mut *mem, pos);
        body(&mut cursor)?;
        cursor.position()
    };

    if top_level && mem.is_resizable() {
        log::trace!(
            target: "fieldcast",
            "trim buffer {} -> {end}",
            mem.as_bytes().len()
        );
        mem.resize_to(end);
    }
    log::trace!(target: "fieldcast", "serialize done at {end}");
    Ok(end)
}

/// Run a decode pass.
pub(crate) fn decode_with<F>(mem: &[u8], pos: usize, body: F) -> Result<usize>
where
    F: FnOnce(&mut ByteReader<'_>) -> Result<()>,
{
    log::trace!(target: "fieldcast", "deserialize from {pos} of {}", mem.len());
    let mut reader = ByteReader::new(mem, pos);
    body(&mut reader)?;
    log::trace!(target: "fieldcast", "deserialize done at {}", reader.position());
    Ok(reader.position())
}

/// Encode a list of places: `serialize!(buf, pos, a, b, obj.c)`.
///
/// Expands to [`serialize`](crate::serialize) with each place borrowed
/// mutably as a [`Field`](crate::Field).
#[macro_export]
macro_rules! serialize {
    ($mem:expr, $pos:expr $(, $field:expr)* $(,)?) => {
        $crate::serialize(
            $mem,
            $pos,
            &mut [$(&mut $field as &mut dyn $crate::Field),*],
        )
    };
}

/// Decode a list of places: `deserialize!(buf, pos, a, b, obj.c)`.
#[macro_export]
macro_rules! deserialize {
    ($mem:expr, $pos:expr $(, $field:expr)* $(,)?) => {
        $crate::deserialize(
            $mem,
            $pos,
            &mut [$(&mut $field as &mut dyn $crate::Field),*],
        )
    };
}
