//! Static classification of field types.
//!
//! Every type that can be bound to an attribute implements [`Convert`] and
//! names its category through [`Convert::KIND`]. There is no runtime tag: the
//! category is a constant resolved when the impl is selected, and a type
//! without an impl cannot be registered at all.

use crate::Convert;

/// Encoding category of a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Scalars, tuples and nested objects, encoded by value.
    Value,
    /// `String`, length-prefixed UTF-8.
    String,
    /// Nullable owning pointer, `Option<T>` (usually `Option<Box<T>>`).
    ///
    /// Decoding releases the held value before installing the new one.
    Pointer,
    /// Uniquely owned pointer, `Box<T>`.
    UniquePointer,
    /// Shared pointer, `Rc<T>` or `Arc<T>`. Sharing is not preserved.
    SharedPointer,
    /// Fixed-size array `[T; N]`, no length prefix.
    Array,
    /// Iterable collection with a count prefix.
    Container,
    /// Raw copy of a defined-layout value, see [`Blit`](crate::Blit).
    Blit,
}

impl Kind {
    /// True for every pointer flavor.
    #[inline]
    pub const fn is_pointer(self) -> bool {
        matches!(
            self,
            Kind::Pointer | Kind::UniquePointer | Kind::SharedPointer
        )
    }

    /// True if the slot may be empty and must be released before decoding.
    #[inline]
    pub const fn is_nullable(self) -> bool {
        matches!(self, Kind::Pointer)
    }

    /// True for element sequences.
    #[inline]
    pub const fn is_sequence(self) -> bool {
        matches!(self, Kind::String | Kind::Array | Kind::Container)
    }

    /// True if decoding always allocates a fresh pointee.
    #[inline]
    pub const fn is_owned_indirection(self) -> bool {
        matches!(self, Kind::UniquePointer | Kind::SharedPointer)
    }

    /// Short lowercase label, used in log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Value => "value",
            Kind::String => "string",
            Kind::Pointer => "pointer",
            Kind::UniquePointer => "unique pointer",
            Kind::SharedPointer => "shared pointer",
            Kind::Array => "array",
            Kind::Container => "container",
            Kind::Blit => "blit",
        }
    }
}

impl core::fmt::Display for Kind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of `T`.
#[inline]
pub const fn kind_of<T: Convert>() -> Kind {
    T::KIND
}

/// How a bound accessor reaches its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Direct mutable reference to the field.
    Reference,
    /// Getter for encoding, setter taking the field's type for decoding.
    Setter,
}
