//! Fields as seen by the entry points.
//!
//! Anything passed to [`serialize`](crate::serialize) or
//! [`deserialize`](crate::deserialize) is a [`Field`]: every [`Convert`]
//! type, an [`AttributeList`](crate::AttributeList), a [`Slot`] pairing a
//! reference with an explicit convertor, or a [`Custom`] routine that takes
//! over both directions.

use crate::{ByteCursor, ByteReader, Convert, Convertor, Kind, Result};

/// Something that can be encoded at a cursor and decoded in place.
pub trait Field {
    /// Encode at the cursor.
    fn serialize_field(&mut self, cursor: &mut ByteCursor<'_>) -> Result<()>;

    /// Decode at the reader, replacing the current contents.
    fn deserialize_field(&mut self, reader: &mut ByteReader<'_>) -> Result<()>;
}

impl<T: Convert> Field for T {
    #[inline]
    fn serialize_field(&mut self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        self.encode(cursor)
    }

    #[inline]
    fn deserialize_field(&mut self, reader: &mut ByteReader<'_>) -> Result<()> {
        self.decode_into(reader)
    }
}

/// A borrowed value paired with the convertor that encodes it.
pub struct Slot<'a, T, C> {
    value: &'a mut T,
    convertor: C,
}

impl<'a, T, C: Convertor<T>> Slot<'a, T, C> {
    /// Bind `value` to `convertor`.
    #[inline]
    pub fn new(value: &'a mut T, convertor: C) -> Self {
        Self { value, convertor }
    }

    /// Category the convertor encodes the value as.
    #[inline]
    pub fn kind(&self) -> Kind {
        self.convertor.kind()
    }
}

impl<T, C: Convertor<T>> Field for Slot<'_, T, C> {
    #[inline]
    fn serialize_field(&mut self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        self.convertor.encode(self.value, cursor)
    }

    #[inline]
    fn deserialize_field(&mut self, reader: &mut ByteReader<'_>) -> Result<()> {
        if self.convertor.kind().is_nullable() {
            self.convertor.release(self.value);
        }
        self.convertor.decode_into(self.value, reader)
    }
}

/// Direction of the running call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Encoding into a buffer.
    Serialize,
    /// Decoding from a buffer.
    Deserialize,
}

/// Context handed to a [`Custom`] routine: the direction of the call and
/// the active low-level cursor for it.
pub enum Phase<'p, 'a> {
    /// Encoding; append through the cursor.
    Serialize(&'p mut ByteCursor<'a>),
    /// Decoding; consume through the reader.
    Deserialize(&'p mut ByteReader<'a>),
}

impl Phase<'_, '_> {
    /// Direction of the call.
    #[inline]
    pub fn direction(&self) -> Direction {
        match self {
            Phase::Serialize(_) => Direction::Serialize,
            Phase::Deserialize(_) => Direction::Deserialize,
        }
    }

    /// Current offset of the active cursor.
    #[inline]
    pub fn position(&self) -> usize {
        match self {
            Phase::Serialize(cursor) => cursor.position(),
            Phase::Deserialize(reader) => reader.position(),
        }
    }
}

/// Field whose encoding is fully written by user code.
///
/// # Example
///
/// ```
/// use fieldcast::{Phase, custom, deserialize, serialize};
///
/// let mut celsius = 21.5f32;
/// let mut buf = Vec::new();
/// // Stored as tenths of a degree in an i16.
/// serialize(&mut buf, 0, &mut [&mut custom(|phase| match phase {
///     Phase::Serialize(cursor) => cursor.write(&((celsius * 10.0) as i16)),
///     Phase::Deserialize(reader) => {
///         celsius = f32::from(reader.read::<i16>()?) / 10.0;
///         Ok(())
///     }
/// })]).unwrap();
/// assert_eq!(buf.len(), 2);
/// ```
pub struct Custom<F>(pub F);

impl<F> Field for Custom<F>
where
    F: FnMut(Phase<'_, '_>) -> Result<()>,
{
    #[inline]
    fn serialize_field(&mut self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        (self.0)(Phase::Serialize(cursor))
    }

    #[inline]
    fn deserialize_field(&mut self, reader: &mut ByteReader<'_>) -> Result<()> {
        (self.0)(Phase::Deserialize(reader))
    }
}

/// Wrap a phase-aware routine as a [`Field`].
#[inline]
pub fn custom<F>(routine: F) -> Custom<F>
where
    F: FnMut(Phase<'_, '_>) -> Result<()>,
{
    Custom(routine)
}
