use core::hash::{BuildHasher, Hash};
use std::collections::{HashMap, HashSet};

use super::container::{decode_seq, encode_seq, seq_byte_len};
use crate::{ByteCursor, ByteReader, Convert, Kind, Result};

// Entries are written in iteration order, which differs between runs.
impl<K, V, S> Convert for HashMap<K, V, S>
where
    K: Convert + Eq + Hash,
    V: Convert,
    S: BuildHasher + Default,
{
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

impl<T, S> Convert for HashSet<T, S>
where
    T: Convert + Eq + Hash,
    S: BuildHasher + Default,
{
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
