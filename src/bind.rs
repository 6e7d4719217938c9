//! Deferred serialization: capture an object and its accessors now, pick
//! the buffer and position later.

use alloc::{boxed::Box, vec::Vec};
use core::marker::PhantomData;

use crate::{
    AccessKind, Buffer, ByteCursor, ByteReader, Convert, Field, Result,
    entry::{decode_with, encode_with},
};

/// Reaches one field of an `O`.
pub trait Accessor<O> {
    /// How the field is reached.
    fn access_kind(&self) -> AccessKind;

    /// Encode the field of `obj` at the cursor.
    fn serialize_from(&self, obj: &mut O, cursor: &mut ByteCursor<'_>) -> Result<()>;

    /// Decode into the field of `obj` at the reader.
    fn deserialize_into(&self, obj: &mut O, reader: &mut ByteReader<'_>) -> Result<()>;
}

/// Boxed accessor, the element type of a binder's accessor list.
pub type BoxAccessor<'a, O> = Box<dyn Accessor<O> + 'a>;

/// Accessor projecting a mutable reference to the field.
pub struct Member<F, T> {
    project: F,
    _field: PhantomData<fn() -> T>,
}

impl<O, T, F> Accessor<O> for Member<F, T>
where
    T: Convert,
    F: Fn(&mut O) -> &mut T,
{
    #[inline]
    fn access_kind(&self) -> AccessKind {
        AccessKind::Reference
    }

    #[inline]
    fn serialize_from(&self, obj: &mut O, cursor: &mut ByteCursor<'_>) -> Result<()> {
        (self.project)(obj).serialize_field(cursor)
    }

    #[inline]
    fn deserialize_into(&self, obj: &mut O, reader: &mut ByteReader<'_>) -> Result<()> {
        (self.project)(obj).deserialize_field(reader)
    }
}

/// Accessor going through a getter and a setter.
///
/// The setter receives a freshly decoded value of the field's type.
pub struct Property<G, S, T> {
    get: G,
    set: S,
    _field: PhantomData<fn() -> T>,
}

impl<O, T, G, S> Accessor<O> for Property<G, S, T>
where
    T: Convert,
    G: Fn(&O) -> T,
    S: Fn(&mut O, T),
{
    #[inline]
    fn access_kind(&self) -> AccessKind {
        AccessKind::Setter
    }

    #[inline]
    fn serialize_from(&self, obj: &mut O, cursor: &mut ByteCursor<'_>) -> Result<()> {
        (self.get)(&*obj).encode(cursor)
    }

    #[inline]
    fn deserialize_into(&self, obj: &mut O, reader: &mut ByteReader<'_>) -> Result<()> {
        let value = T::decode(reader)?;
        (self.set)(obj, value);
        Ok(())
    }
}

/// Accessor for a field reached by reference, e.g. `member(|p: &mut P| &mut p.x)`.
pub fn member<'a, O, T, F>(project: F) -> BoxAccessor<'a, O>
where
    T: Convert + 'a,
    F: Fn(&mut O) -> &mut T + 'a,
    O: 'a,
{
    Box::new(Member {
        project,
        _field: PhantomData,
    })
}

/// Accessor for a field reached through a getter / setter pair.
pub fn property<'a, O, T, G, S>(get: G, set: S) -> BoxAccessor<'a, O>
where
    T: Convert + 'a,
    G: Fn(&O) -> T + 'a,
    S: Fn(&mut O, T) + 'a,
    O: 'a,
{
    Box::new(Property {
        get,
        set,
        _field: PhantomData,
    })
}

/// Serializer bound to one object, see [`bind_serialize`].
pub struct BoundSerialize<'a, O> {
    obj: &'a mut O,
    accessors: Vec<BoxAccessor<'a, O>>,
}

impl<O> BoundSerialize<'_, O> {
    /// Encode the bound fields into `mem` at `pos`, with the sizing rule of
    /// [`serialize`](crate::serialize).
    pub fn run<B: Buffer>(&mut self, mem: &mut B, pos: usize) -> Result<usize> {
        let Self { obj, accessors } = self;
        encode_with(mem, pos, |cursor| {
            accessors
                .iter()
                .try_for_each(|accessor| accessor.serialize_from(&mut **obj, cursor))
        })
    }

    /// Number of bound accessors.
    #[inline]
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    /// True if nothing is bound.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

/// Deserializer bound to one object, see [`bind_deserialize`].
pub struct BoundDeserialize<'a, O> {
    obj: &'a mut O,
    accessors: Vec<BoxAccessor<'a, O>>,
}

impl<O> BoundDeserialize<'_, O> {
    /// Decode the bound fields from `mem` at `pos`.
    pub fn run(&mut self, mem: &[u8], pos: usize) -> Result<usize> {
        let Self { obj, accessors } = self;
        decode_with(mem, pos, |reader| {
            accessors
                .iter()
                .try_for_each(|accessor| accessor.deserialize_into(&mut **obj, reader))
        })
    }

    /// Number of bound accessors.
    #[inline]
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    /// True if nothing is bound.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

/// Capture `obj` and the accessors of the fields to encode.
///
/// ```
/// use fieldcast::{bind_deserialize, bind_serialize, member, property};
///
/// #[derive(Default)]
/// struct Account { id: u32, balance: i64 }
///
/// impl Account {
///     fn balance(&self) -> i64 { self.balance }
///     fn set_balance(&mut self, v: i64) { self.balance = v }
/// }
///
/// let mut src = Account { id: 3, balance: -40 };
/// let mut buf = Vec::new();
/// let mut save = bind_serialize(&mut src, vec![
///     member(|a: &mut Account| &mut a.id),
///     property(Account::balance, Account::set_balance),
/// ]);
/// save.run(&mut buf, 0).unwrap();
///
/// let mut dst = Account::default();
/// let mut load = bind_deserialize(&mut dst, vec![
///     member(|a: &mut Account| &mut a.id),
///     property(Account::balance, Account::set_balance),
/// ]);
/// load.run(&buf, 0).unwrap();
/// drop(load);
/// assert_eq!((dst.id, dst.balance), (3, -40));
/// ```
pub fn bind_serialize<'a, O>(
    obj: &'a mut O,
    accessors: Vec<BoxAccessor<'a, O>>,
) -> BoundSerialize<'a, O> {
    BoundSerialize { obj, accessors }
}

/// Capture `obj` and the accessors of the fields to decode.
pub fn bind_deserialize<'a, O>(
    obj: &'a mut O,
    accessors: Vec<BoxAccessor<'a, O>>,
) -> BoundDeserialize<'a, O> {
    BoundDeserialize { obj, accessors }
}
