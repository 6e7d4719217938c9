mod macros;
mod pointer;
mod container;

#[cfg(feature = "std")]
mod hash;

use alloc::vec::Vec;

use crate::{ByteCursor, ByteReader, Convert, Kind, Result, error::InvalidDataSnafu};

/// Sum of two optional sizes, `None` if either is unknown.
pub(crate) const fn add_max(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(a), Some(b)) => a.checked_add(b),
        _ => None,
    }
}

/// Read a u64 count and check it fits a `usize`.
pub(crate) fn decode_len(reader: &mut ByteReader<'_>) -> Result<usize> {
    let len = u64::decode(reader)?;
    usize::try_from(len).map_err(|_| {
        InvalidDataSnafu {
            message: "length does not fit in usize",
        }
        .build()
    })
}

impl Convert for bool {
    const KIND: Kind = Kind::Value;
    const MAX_SIZE: Option<usize> = Some(1);

    #[inline]
    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        cursor.append(&[u8::from(*self)])
    }

    #[inline]
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        match u8::decode(reader)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => InvalidDataSnafu {
                message: "bool must be 0 or 1",
            }
            .fail(),
        }
    }
}

// usize/isize travel as u64/i64 so both ends agree on width.
impl Convert for usize {
    const KIND: Kind = Kind::Value;
    const MAX_SIZE: Option<usize> = Some(8);

    #[inline]
    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        (*self as u64).encode(cursor)
    }

    #[inline]
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        decode_len(reader)
    }
}

impl Convert for isize {
    const KIND: Kind = Kind::Value;
    const MAX_SIZE: Option<usize> = Some(8);

    #[inline]
    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        (*self as i64).encode(cursor)
    }

    #[inline]
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        isize::try_from(i64::decode(reader)?).map_err(|_| {
            InvalidDataSnafu {
                message: "isize out of range",
            }
            .build()
        })
    }
}

impl Convert for f32 {
    const KIND: Kind = Kind::Value;
    const MAX_SIZE: Option<usize> = Some(4);

    #[inline]
    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        self.to_bits().encode(cursor)
    }

    #[inline]
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        u32::decode(reader).map(f32::from_bits)
    }
}

impl Convert for f64 {
    const KIND: Kind = Kind::Value;
    const MAX_SIZE: Option<usize> = Some(8);

    #[inline]
    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        self.to_bits().encode(cursor)
    }

    #[inline]
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        u64::decode(reader).map(f64::from_bits)
    }
}

impl Convert for () {
    const KIND: Kind = Kind::Value;
    const MAX_SIZE: Option<usize> = Some(0);

    #[inline]
    fn encode(&self, _cursor: &mut ByteCursor<'_>) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn decode(_reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(())
    }
}

impl Convert for char {
    const KIND: Kind = Kind::Value;
    const MAX_SIZE: Option<usize> = Some(4);

    #[inline]
    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        u32::from(*self).encode(cursor)
    }

    #[inline]
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        char::from_u32(u32::decode(reader)?).ok_or_else(|| {
            InvalidDataSnafu {
                message: "invalid char codepoint",
            }
            .build()
        })
    }
}

// Fixed arrays carry no count: N is part of the type.
impl<T: Convert, const N: usize> Convert for [T; N] {
    const KIND: Kind = Kind::Array;
    const MAX_SIZE: Option<usize> = match T::MAX_SIZE {
        Some(s) => s.checked_mul(N),
        None => None,
    };

    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        self.iter().try_for_each(|item| item.encode(cursor))
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let items = (0..N)
            .map(|_| T::decode(reader))
            .collect::<Result<Vec<T>>>()?;
        items.try_into().map_err(|_| {
            InvalidDataSnafu {
                message: "array length mismatch",
            }
            .build()
        })
    }

    // Element-wise, so nullable elements release their own pointees.
    fn decode_into(&mut self, reader: &mut ByteReader<'_>) -> Result<()> {
        self.iter_mut().try_for_each(|item| item.decode_into(reader))
    }

    fn byte_len(&self) -> Option<usize> {
        self.iter()
            .try_fold(0usize, |total, item| total.checked_add(item.byte_len()?))
    }
}

// Option is the nullable pointer: a 0/1 tag, then the pointee if present.
impl<T: Convert> Convert for Option<T> {
    const KIND: Kind = Kind::Pointer;
    const MAX_SIZE: Option<usize> = add_max(Some(1), T::MAX_SIZE);

    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        match self {
            None => cursor.append(&[0]),
            Some(value) => {
                cursor.append(&[1])?;
                value.encode(cursor)
            }
        }
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        match u8::decode(reader)? {
            0 => Ok(None),
            1 => T::decode(reader).map(Some),
            _ => InvalidDataSnafu {
                message: "pointer tag must be 0 or 1",
            }
            .fail(),
        }
    }

    #[inline]
    fn release(&mut self) {
        if self.take().is_some() {
            log::trace!(target: "fieldcast", "released pointee before decode");
        }
    }

    fn byte_len(&self) -> Option<usize> {
        match self {
            None => Some(1),
            Some(value) => value.byte_len()?.checked_add(1),
        }
    }
}
