//! Byte buffers the codec writes into.
//!
//! A [`Buffer`] is either resizable (`Vec<u8>`) or a fixed-capacity view
//! (`[u8; N]`, `&mut [u8]`). The distinction only matters for the top-level
//! sizing rule of [`serialize`](crate::serialize): a resizable buffer ends up
//! exactly as long as the encoded data, a fixed view is never resized.

use alloc::vec::Vec;

use crate::error::{BufferTooSmallSnafu, Result};

/// Destination of encoded bytes.
pub trait Buffer {
    /// Current contents.
    fn as_bytes(&self) -> &[u8];

    /// Current contents, mutably.
    fn as_bytes_mut(&mut self) -> &mut [u8];

    /// Make sure at least `len` bytes are addressable.
    ///
    /// Resizable buffers grow (zero-filled); fixed views fail with
    /// [`BytesError::BufferTooSmall`](crate::BytesError::BufferTooSmall).
    fn grow_to(&mut self, len: usize) -> Result<()>;

    /// True if [`resize_to`](Buffer::resize_to) changes the length.
    #[inline]
    fn is_resizable(&self) -> bool {
        false
    }

    /// Set the length to exactly `len`. No-op for fixed views.
    #[inline]
    fn resize_to(&mut self, _len: usize) {}
}

impl Buffer for Vec<u8> {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self
    }

    #[inline]
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }

    #[inline]
    fn grow_to(&mut self, len: usize) -> Result<()> {
        if len > self.len() {
            self.resize(len, 0);
        }
        Ok(())
    }

    #[inline]
    fn is_resizable(&self) -> bool {
        true
    }

    #[inline]
    fn resize_to(&mut self, len: usize) {
        self.resize(len, 0);
    }
}

impl<const N: usize> Buffer for [u8; N] {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self
    }

    #[inline]
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }

    #[inline]
    fn grow_to(&mut self, len: usize) -> Result<()> {
        fixed_capacity(N, len)
    }
}

impl Buffer for &mut [u8] {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self
    }

    #[inline]
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }

    #[inline]
    fn grow_to(&mut self, len: usize) -> Result<()> {
        fixed_capacity(self.len(), len)
    }
}

#[inline]
fn fixed_capacity(available: usize, needed: usize) -> Result<()> {
    if needed > available {
        return BufferTooSmallSnafu { needed, available }.fail();
    }
    Ok(())
}
