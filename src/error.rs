//! Error types for encoding and decoding.

use snafu::Snafu;

/// Error during encoding, decoding or field registration.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum BytesError {
    /// A fixed-capacity buffer cannot hold the encoded bytes.
    #[snafu(display("buffer too small: needed {needed} bytes, only {available} available"))]
    BufferTooSmall {
        /// Bytes needed.
        needed: usize,
        /// Bytes available.
        available: usize,
    },

    /// Input ended before a value was fully decoded.
    #[snafu(display("unexpected end of input: needed {needed} bytes, only {available} available"))]
    UnexpectedEof {
        /// Bytes needed.
        needed: usize,
        /// Bytes available.
        available: usize,
    },

    /// Bytes do not form a valid value of the requested type.
    #[snafu(display("invalid data: {message}"))]
    InvalidData {
        /// Error description.
        message: &'static str,
    },

    /// More fields were bound than the identifier string names.
    #[snafu(display("identifier list has no name left for field #{index}"))]
    MissingIdentifier {
        /// Zero-based position of the field without a name.
        index: usize,
    },

    /// The identifier string names more fields than were bound.
    #[snafu(display("identifier list has {count} unbound name(s) left"))]
    UnboundIdentifiers {
        /// Names left over after the last binding.
        count: usize,
    },

    /// Custom error for user routines.
    #[snafu(display("{message}"))]
    Custom {
        /// Error description.
        message: &'static str,
    },
}

/// Result type for fieldcast operations.
pub type Result<T, E = BytesError> = core::result::Result<T, E>;
