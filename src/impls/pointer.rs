//! Owning pointers encode their pointee; the address is never written.
//! `MAX_SIZE` is left unknown and never reads the pointee's bound, which
//! keeps self-referencing types free of const cycles.

use alloc::{boxed::Box, rc::Rc};

use crate::{ByteCursor, ByteReader, Convert, Kind, Result};

impl<T: Convert> Convert for Box<T> {
    const KIND: Kind = Kind::UniquePointer;

    #[inline]
    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        (**self).encode(cursor)
    }

    #[inline]
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        T::decode(reader).map(Box::new)
    }

    #[inline]
    fn byte_len(&self) -> Option<usize> {
        (**self).byte_len()
    }
}

// Shared pointers decode to a fresh, unshared allocation.
impl<T: Convert> Convert for Rc<T> {
    const KIND: Kind = Kind::SharedPointer;

    #[inline]
    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        (**self).encode(cursor)
    }

    #[inline]
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        T::decode(reader).map(Rc::new)
    }

    #[inline]
    fn byte_len(&self) -> Option<usize> {
        (**self).byte_len()
    }
}

#[cfg(target_has_atomic = "ptr")]
impl<T: Convert> Convert for alloc::sync::Arc<T> {
    const KIND: Kind = Kind::SharedPointer;

    #[inline]
    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        (**self).encode(cursor)
    }

    #[inline]
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        T::decode(reader).map(alloc::sync::Arc::new)
    }

    #[inline]
    fn byte_len(&self) -> Option<usize> {
        (**self).byte_len()
    }
}
