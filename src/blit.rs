//! Raw memory copies for defined-layout types.
//!
//! These paths copy `size_of::<T>()` bytes of a value's in-memory
//! representation instead of walking its fields. The bytes are in native
//! byte order and include the type's exact layout, so the encoding side and
//! the decoding side must run the same target with the same type
//! definition. Nothing in the stream records either; a mismatch decodes
//! garbage.
//!
//! Eligible types derive zerocopy's traits (re-exported as [`ZcFromBytes`],
//! [`IntoBytes`], [`Immutable`] and [`KnownLayout`]) and are usually
//! `#[repr(C)]`.
//!
//! [`ZcFromBytes`]: crate::ZcFromBytes
//! [`IntoBytes`]: crate::IntoBytes
//! [`Immutable`]: crate::Immutable
//! [`KnownLayout`]: crate::KnownLayout
//!
//! # Example
//!
//! ```
//! use fieldcast::{Immutable, IntoBytes, KnownLayout, ZcFromBytes};
//! use fieldcast::{deserialize_struct, serialize_struct};
//!
//! #[derive(ZcFromBytes, IntoBytes, Immutable, KnownLayout, Debug, PartialEq)]
//! #[repr(C)]
//! struct Sample { t: u64, value: f32, channel: u32 }
//!
//! let s = Sample { t: 9, value: 0.5, channel: 3 };
//! let mut buf = Vec::new();
//! let end = serialize_struct(&mut buf, 0, &s).unwrap();
//! assert_eq!(end, core::mem::size_of::<Sample>());
//!
//! let mut back = Sample { t: 0, value: 0.0, channel: 0 };
//! deserialize_struct(&buf, 0, &mut back).unwrap();
//! assert_eq!(back, s);
//! ```

use core::mem::size_of;

use crate::{
    Buffer, ByteCursor, ByteReader, Convert, Convertor, Kind, Result, error::InvalidDataSnafu,
};

/// Types whose bytes can be copied in and out verbatim.
///
/// Implemented for every type with zerocopy's `IntoBytes`, `FromBytes`,
/// `Immutable` and `KnownLayout`.
pub trait Blittable:
    zerocopy::IntoBytes + zerocopy::FromBytes + zerocopy::Immutable + zerocopy::KnownLayout
{
}

impl<T> Blittable for T where
    T: zerocopy::IntoBytes + zerocopy::FromBytes + zerocopy::Immutable + zerocopy::KnownLayout
{
}

/// Convertor that raw-copies the bound value. See the module docs for the
/// layout caveats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Raw;

impl<T: Blittable> Convertor<T> for Raw {
    #[inline]
    fn kind(&self) -> Kind {
        Kind::Blit
    }

    #[inline]
    fn encode(&self, value: &T, cursor: &mut ByteCursor<'_>) -> Result<()> {
        cursor.append(value.as_bytes())
    }

    #[inline]
    fn decode(&self, reader: &mut ByteReader<'_>) -> Result<T> {
        let bytes = reader.take(size_of::<T>())?;
        T::read_from_bytes(bytes).map_err(|_| {
            InvalidDataSnafu {
                message: "raw copy size mismatch",
            }
            .build()
        })
    }

    // Plain memory holds no allocation.
    #[inline]
    fn release(&self, _value: &mut T) {}
}

/// Wrapper that opts a value into the raw-copy path wherever a [`Convert`]
/// type is expected, e.g. `Vec<Blit<Pixel>>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Blit<T>(pub T);

impl<T> Blit<T> {
    /// Unwrap the value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> core::ops::Deref for Blit<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> core::ops::DerefMut for Blit<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: Blittable> Convert for Blit<T> {
    const KIND: Kind = Kind::Blit;
    const MAX_SIZE: Option<usize> = Some(size_of::<T>());

    #[inline]
    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        <Raw as Convertor<T>>::encode(&Raw, &self.0, cursor)
    }

    #[inline]
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        <Raw as Convertor<T>>::decode(&Raw, reader).map(Blit)
    }
}

/// Raw-copy `obj` into `mem` at `pos`, returning the next position.
///
/// Unlike [`serialize`](crate::serialize) this never trims the buffer.
pub fn serialize_struct<B, T>(mem: &mut B, pos: usize, obj: &T) -> Result<usize>
where
    B: Buffer,
    T: Blittable,
{
    let mut cursor = ByteCursor::new(mem, pos);
    <Raw as Convertor<T>>::encode(&Raw, obj, &mut cursor)?;
    log::trace!(target: "fieldcast", "blit {} bytes at {pos}", size_of::<T>());
    Ok(cursor.position())
}

/// Raw-copy `size_of::<T>()` bytes of `mem` at `pos` over `obj`, returning
/// the next position.
pub fn deserialize_struct<T: Blittable>(mem: &[u8], pos: usize, obj: &mut T) -> Result<usize> {
    let mut reader = ByteReader::new(mem, pos);
    *obj = <Raw as Convertor<T>>::decode(&Raw, &mut reader)?;
    log::trace!(target: "fieldcast", "unblit {} bytes at {pos}", size_of::<T>());
    Ok(reader.position())
}
