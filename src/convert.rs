//! Per-type codecs and the strategies that select them.

use alloc::vec::Vec;

use crate::{ByteCursor, ByteReader, Kind, Result};

/// Native codec of a type.
///
/// The impl is the classification: [`KIND`](Convert::KIND) names the
/// category and the methods perform it.
///
/// # Example
///
/// ```
/// use fieldcast::{Convert, ConvertExt, Kind};
///
/// let bytes = 42u32.to_vec().unwrap();
/// assert_eq!(bytes, [42, 0, 0, 0]);
/// assert_eq!(u32::KIND, Kind::Value);
///
/// let (value, consumed) = u32::from_slice(&bytes).unwrap();
/// assert_eq!((value, consumed), (42, 4));
/// ```
pub trait Convert: Sized {
    /// Encoding category.
    const KIND: Kind;

    /// Maximum encoded size, if known at compile time.
    const MAX_SIZE: Option<usize> = None;

    /// Append the encoded value at the cursor.
    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()>;

    /// Decode a fresh value at the reader.
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self>;

    /// Decode over an existing value.
    ///
    /// Nullable pointers are released first. If the decode then fails the
    /// slot stays released; the old value is not restored.
    #[inline]
    fn decode_into(&mut self, reader: &mut ByteReader<'_>) -> Result<()> {
        if Self::KIND.is_nullable() {
            self.release();
        }
        *self = Self::decode(reader)?;
        Ok(())
    }

    /// Drop any held allocation, leaving the slot empty.
    #[inline]
    fn release(&mut self) {}

    /// Encoded size of this value, if cheap to compute.
    #[inline]
    fn byte_len(&self) -> Option<usize> {
        Self::MAX_SIZE
    }
}

/// Owned-buffer helpers for [`Convert`] types.
pub trait ConvertExt: Convert {
    /// Encode into a new, exactly sized vector.
    fn to_vec(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.byte_len().unwrap_or(0));
        crate::serialize(&mut out, 0, &mut [&mut Encoded(self)])?;
        Ok(out)
    }

    /// Decode from the start of `buf`, returning the value and bytes consumed.
    fn from_slice(buf: &[u8]) -> Result<(Self, usize)> {
        let mut reader = ByteReader::new(buf, 0);
        let value = Self::decode(&mut reader)?;
        Ok((value, reader.position()))
    }
}

impl<T: Convert> ConvertExt for T {}

/// Read-only field view used by [`ConvertExt::to_vec`].
struct Encoded<'a, T>(&'a T);

impl<T: Convert> crate::Field for Encoded<'_, T> {
    fn serialize_field(&mut self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        self.0.encode(cursor)
    }

    fn deserialize_field(&mut self, _reader: &mut ByteReader<'_>) -> Result<()> {
        crate::error::InvalidDataSnafu {
            message: "read-only field cannot be decoded",
        }
        .fail()
    }
}

/// Encoding strategy for values of type `T`.
///
/// Attributes carry one convertor each. [`Native`] defers to the type's
/// [`Convert`] impl; [`Raw`](crate::Raw) copies memory.
pub trait Convertor<T> {
    /// Category this strategy encodes `T` as.
    fn kind(&self) -> Kind;

    /// Append `value` at the cursor.
    fn encode(&self, value: &T, cursor: &mut ByteCursor<'_>) -> Result<()>;

    /// Decode a fresh value at the reader.
    fn decode(&self, reader: &mut ByteReader<'_>) -> Result<T>;

    /// Decode over an existing value.
    #[inline]
    fn decode_into(&self, value: &mut T, reader: &mut ByteReader<'_>) -> Result<()> {
        *value = self.decode(reader)?;
        Ok(())
    }

    /// Drop any allocation `value` holds, leaving it empty.
    ///
    /// Called before every decode when [`kind`](Convertor::kind) is
    /// nullable, so a failed decode leaves the field released.
    fn release(&self, value: &mut T);
}

/// Strategy that uses the type's own [`Convert`] impl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Native;

impl<T: Convert> Convertor<T> for Native {
    #[inline]
    fn kind(&self) -> Kind {
        T::KIND
    }

    #[inline]
    fn encode(&self, value: &T, cursor: &mut ByteCursor<'_>) -> Result<()> {
        value.encode(cursor)
    }

    #[inline]
    fn decode(&self, reader: &mut ByteReader<'_>) -> Result<T> {
        T::decode(reader)
    }

    #[inline]
    fn decode_into(&self, value: &mut T, reader: &mut ByteReader<'_>) -> Result<()> {
        value.decode_into(reader)
    }

    #[inline]
    fn release(&self, value: &mut T) {
        value.release();
    }
}
