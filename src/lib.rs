//! Positional object-to-bytes codec.
//!
//! An object exposes its fields as an ordered [`AttributeList`]; encoding
//! appends each field's bytes in order, decoding reads them back in the same
//! order. Nothing but field bytes is written: no tags, no names, no version.
//! Both sides must agree on the sequence of field types.
//!
//! Every bindable type implements [`Convert`], whose [`KIND`](Convert::KIND)
//! picks the encoding category ([`Kind`]) at compile time.
//!
//! # Example
//!
//! ```
//! use fieldcast::{Serializable, deserialize, serialize};
//!
//! #[derive(Default, Serializable)]
//! struct Reading {
//!     sensor: String,
//!     values: Vec<f64>,
//!     calibration: Option<Box<i32>>,
//! }
//!
//! let mut src = Reading {
//!     sensor: "t1".into(),
//!     values: vec![1.5, 2.5],
//!     calibration: Some(Box::new(-3)),
//! };
//! let mut buf = Vec::new();
//! let end = serialize(&mut buf, 0, &mut [&mut src.attributes()]).unwrap();
//! assert_eq!(end, buf.len());
//!
//! let mut dst = Reading::default();
//! deserialize(&buf, 0, &mut [&mut dst.attributes()]).unwrap();
//! assert_eq!(dst.sensor, "t1");
//! assert_eq!(dst.values, [1.5, 2.5]);
//! assert_eq!(dst.calibration.as_deref(), Some(&-3));
//! ```
//!
//! # Wire format
//!
//! - integers and floats: little endian, `usize`/`isize` as 64-bit
//! - `bool`: one byte, 0 or 1
//! - `String`: u64 byte length, then UTF-8
//! - containers: u64 element count, then the elements
//! - `[T; N]`: the N elements, no count
//! - `Option<T>`: tag byte 0 (absent) or 1 followed by the pointee
//! - `Box`/`Rc`/`Arc`: the pointee
//! - [`Blit`] / [`Raw`]: `size_of::<T>()` bytes of native memory
#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

mod attr;
mod bind;
mod blit;
mod buffer;
mod convert;
mod cursor;
mod entry;
mod error;
mod field;
mod impls;
mod kind;

pub use attr::{Attribute, AttributeList, ID_DELIMITER, IdBinder, Serializable};
pub use bind::{
    Accessor, BoundDeserialize, BoundSerialize, BoxAccessor, Member, Property, bind_deserialize,
    bind_serialize, member, property,
};
pub use blit::{Blit, Blittable, Raw, deserialize_struct, serialize_struct};
pub use buffer::Buffer;
pub use convert::{Convert, ConvertExt, Convertor, Native};
pub use cursor::{ByteCursor, ByteReader};
pub use entry::{deserialize, serialize};
pub use error::{BytesError, Result};
pub use field::{Custom, Direction, Field, Phase, Slot, custom};
pub use kind::{AccessKind, Kind, kind_of};

pub use zerocopy::{FromBytes as ZcFromBytes, Immutable, IntoBytes, KnownLayout};

#[cfg(feature = "derive")]
pub use fieldcast_macros::Serializable;

#[cfg(test)]
mod tests;
