//! Running offsets threaded through one encode or decode call.

use crate::{
    Buffer, Convert, Field,
    error::{InvalidDataSnafu, Result, UnexpectedEofSnafu},
};

/// Write position into a [`Buffer`].
///
/// One cursor exists per top-level call; every convertor appends at the
/// current position and the position only moves forward.
pub struct ByteCursor<'a> {
    buf: &'a mut dyn Buffer,
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor writing into `buf` starting at `pos`.
    #[inline]
    pub fn new(buf: &'a mut dyn Buffer, pos: usize) -> Self {
        Self { buf, pos }
    }

    /// Offset of the next byte to be written.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Copy `bytes` at the cursor and advance past them.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        let start = self.pos;
        let end = start.checked_add(bytes.len()).ok_or_else(|| {
            InvalidDataSnafu {
                message: "buffer offset overflows usize",
            }
            .build()
        })?;
        self.buf.grow_to(end)?;
        self.buf.as_bytes_mut()[start..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    /// Encode a value at the cursor.
    #[inline]
    pub fn write<T: Convert>(&mut self, value: &T) -> Result<()> {
        value.encode(self)
    }

    /// Encode a list of fields at the cursor.
    ///
    /// This is the nested form of [`serialize`](crate::serialize): it shares
    /// the caller's buffer and position and never resizes the buffer.
    pub fn write_fields(&mut self, fields: &mut [&mut dyn Field]) -> Result<usize> {
        for field in fields.iter_mut() {
            field.serialize_field(self)?;
        }
        Ok(self.pos)
    }
}

/// Read position into an encoded byte slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader over `buf` starting at `pos`.
    #[inline]
    pub fn new(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    /// Offset of the next byte to be read.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Borrow the next `len` bytes and advance past them.
    ///
    /// A reader positioned past the end of its buffer fails even for `len == 0`.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if len > available || self.pos > self.buf.len() {
            return UnexpectedEofSnafu {
                needed: len,
                available,
            }
            .fail();
        }
        let buf = self.buf;
        let start = self.pos;
        self.pos += len;
        Ok(&buf[start..self.pos])
    }

    /// Copy the next `N` bytes into an array.
    #[inline]
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Decode a value at the cursor.
    #[inline]
    pub fn read<T: Convert>(&mut self) -> Result<T> {
        T::decode(self)
    }

    /// Decode a list of fields at the cursor, the nested form of
    /// [`deserialize`](crate::deserialize).
    pub fn read_fields(&mut self, fields: &mut [&mut dyn Field]) -> Result<usize> {
        for field in fields.iter_mut() {
            field.deserialize_field(self)?;
        }
        Ok(self.pos)
    }
}
