use alloc::{
    collections::{BTreeMap, BTreeSet, LinkedList, VecDeque},
    string::String,
    vec::Vec,
};

use super::decode_len;
use crate::{ByteCursor, ByteReader, Convert, Kind, Result, error::InvalidDataSnafu};

impl Convert for String {
    const KIND: Kind = Kind::String;

    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        cursor.write(&self.len())?;
        cursor.append(self.as_bytes())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let len = decode_len(reader)?;
        let bytes = reader.take(len)?;
        core::str::from_utf8(bytes).map(String::from).map_err(|_| {
            InvalidDataSnafu {
                message: "invalid UTF-8",
            }
            .build()
        })
    }

    fn byte_len(&self) -> Option<usize> {
        Some(8 + self.len())
    }
}

/// Append a u64 count followed by each element.
pub(crate) fn encode_seq<'i, T, I>(len: usize, items: I, cursor: &mut ByteCursor<'_>) -> Result<()>
where
    T: Convert + 'i,
    I: IntoIterator<Item = &'i T>,
{
    cursor.write(&len)?;
    items.into_iter().try_for_each(|item| item.encode(cursor))
}

/// Largest count accepted for elements that encode to zero bytes.
pub(crate) const MAX_ZERO_SIZED_COUNT: usize = 1 << 20;

/// Read a u64 count and collect that many elements.
///
/// The collection grows as elements arrive, so a corrupt count fails at the
/// end of the input instead of reserving memory up front. Zero-sized
/// elements never run out of input, so their count is capped instead.
pub(crate) fn decode_seq<T, C>(reader: &mut ByteReader<'_>) -> Result<C>
where
    T: Convert,
    C: FromIterator<T>,
{
    let len = decode_len(reader)?;
    if T::MAX_SIZE == Some(0) && len > MAX_ZERO_SIZED_COUNT {
        return InvalidDataSnafu {
            message: "zero-sized element count too large",
        }
        .fail();
    }
    (0..len).map(|_| T::decode(reader)).collect()
}

pub(crate) fn seq_byte_len<'i, T, I>(items: I) -> Option<usize>
where
    T: Convert + 'i,
    I: IntoIterator<Item = &'i T>,
{
    items
        .into_iter()
        .try_fold(8usize, |total, item| total.checked_add(item.byte_len()?))
}

macro_rules! impl_convert_for_seq {
    ($($seq:ident $(: $bound:ident)?),+) => {
        $(
            impl<T: Convert $(+ $bound)?> Convert for $seq<T> {
                const KIND: Kind = Kind::Container;

                #[inline]
                fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
                    encode_seq(self.len(), self, cursor)
                }

                #[inline]
                fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
                    decode_seq(reader)
                }

                #[inline]
                fn byte_len(&self) -> Option<usize> {
                    seq_byte_len(self)
                }
            }
        )+
    };
}

impl_convert_for_seq!(Vec, VecDeque, LinkedList, BTreeSet: Ord);

impl<K: Convert + Ord, V: Convert> Convert for BTreeMap<K, V> {
    const KIND: Kind = Kind::Container;

    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        cursor.write(&self.len())?;
        self.iter().try_for_each(|(key, value)| {
            key.encode(cursor)?;
            value.encode(cursor)
        })
    }

    #[inline]
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        decode_seq::<(K, V), _>(reader)
    }

    fn byte_len(&self) -> Option<usize> {
        self.iter().try_fold(8usize, |total, (key, value)| {
            total.checked_add(key.byte_len()?)?.checked_add(value.byte_len()?)
        })
    }
}
