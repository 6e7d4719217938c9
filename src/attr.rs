//! Ordered attribute lists over an object's fields.
//!
//! An [`AttributeList`] borrows each field of one object, in declaration
//! order, together with the name it was registered under and the strategy
//! that encodes it. Encoding walks the nodes front to back and appends each
//! field; decoding walks them in the same order. Nothing but the field bytes
//! is written, so both sides must register the same sequence of types.

use alloc::{boxed::Box, vec::Vec};

use crate::{
    ByteCursor, ByteReader, Convert, Convertor, Field, Kind, Native, Phase, Result,
    error::{MissingIdentifierSnafu, UnboundIdentifiersSnafu},
    field::{Custom, Slot},
};

/// Delimiter between names in an identifier string.
pub const ID_DELIMITER: char = ',';

/// One registered field.
pub struct Attribute<'a> {
    name: &'a str,
    kind: Kind,
    binding: Box<dyn Field + 'a>,
}

impl<'a> Attribute<'a> {
    /// Registered name.
    #[inline]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Category the binding is encoded as.
    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }
}

impl core::fmt::Debug for Attribute<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Fields of one object, in wire order.
///
/// # Example
///
/// ```
/// use fieldcast::{AttributeList, deserialize, serialize};
///
/// let (mut id, mut label) = (7u32, String::from("seven"));
/// let mut buf = Vec::new();
/// let mut attrs = AttributeList::new().field("id", &mut id).field("label", &mut label);
/// let end = serialize(&mut buf, 0, &mut [&mut attrs]).unwrap();
/// assert_eq!(end, buf.len());
///
/// let (mut id2, mut label2) = (0u32, String::new());
/// let mut attrs = AttributeList::new().field("id", &mut id2).field("label", &mut label2);
/// deserialize(&buf, 0, &mut [&mut attrs]).unwrap();
/// drop(attrs);
/// assert_eq!((id2, label2.as_str()), (7, "seven"));
/// ```
#[derive(Debug, Default)]
pub struct AttributeList<'a> {
    nodes: Vec<Attribute<'a>>,
}

impl<'a> AttributeList<'a> {
    /// Empty list.
    #[inline]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Start a list whose names come from a comma-separated identifier
    /// string, consumed one name per bound field.
    #[inline]
    pub fn from_ids(ids: &'a str) -> IdBinder<'a> {
        IdBinder {
            rest: Some(ids),
            list: Self::new(),
        }
    }

    /// Register a field encoded by its own [`Convert`] impl.
    #[inline]
    pub fn field<T: Convert>(self, name: &'a str, value: &'a mut T) -> Self {
        self.field_with(name, value, Native)
    }

    /// Register a field with an explicit convertor.
    pub fn field_with<T, C>(mut self, name: &'a str, value: &'a mut T, convertor: C) -> Self
    where
        T: 'a,
        C: Convertor<T> + 'a,
    {
        let slot = Slot::new(value, convertor);
        self.nodes.push(Attribute {
            name,
            kind: slot.kind(),
            binding: Box::new(slot),
        });
        self
    }

    /// Register a field whose bytes are written by a phase-aware routine.
    ///
    /// Custom nodes report [`Kind::Value`].
    pub fn custom<F>(mut self, name: &'a str, routine: F) -> Self
    where
        F: FnMut(Phase<'_, '_>) -> Result<()> + 'a,
    {
        self.nodes.push(Attribute {
            name,
            kind: Kind::Value,
            binding: Box::new(Custom(routine)),
        });
        self
    }

    /// Number of registered fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no field is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Registered nodes, in wire order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Attribute<'a>> {
        self.nodes.iter()
    }

    /// Registered names, in wire order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.nodes.iter().map(|node| node.name)
    }

    /// Categories of the registered fields, in wire order.
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.nodes.iter().map(|node| node.kind)
    }

    /// Encode every field at the cursor, front to back.
    pub fn encode_all(&mut self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        for node in &mut self.nodes {
            log::trace!(
                target: "fieldcast",
                "encoding `{}` ({}) at {}",
                node.name,
                node.kind,
                cursor.position()
            );
            node.binding.serialize_field(cursor)?;
        }
        Ok(())
    }

    /// Decode every field at the reader, front to back.
    ///
    /// Nullable pointer fields drop their current value before the new one
    /// is decoded.
    pub fn decode_all(&mut self, reader: &mut ByteReader<'_>) -> Result<()> {
        for node in &mut self.nodes {
            log::trace!(
                target: "fieldcast",
                "decoding `{}` ({}) at {}",
                node.name,
                node.kind,
                reader.position()
            );
            node.binding.deserialize_field(reader).inspect_err(|err| {
                log::debug!(target: "fieldcast", "attribute `{}` failed: {err}", node.name);
            })?;
        }
        Ok(())
    }
}

impl Field for AttributeList<'_> {
    #[inline]
    fn serialize_field(&mut self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        self.encode_all(cursor)
    }

    #[inline]
    fn deserialize_field(&mut self, reader: &mut ByteReader<'_>) -> Result<()> {
        self.decode_all(reader)
    }
}

impl<'l, 'a> IntoIterator for &'l AttributeList<'a> {
    type Item = &'l Attribute<'a>;
    type IntoIter = core::slice::Iter<'l, Attribute<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builder that names fields from an identifier string.
///
/// Returned by [`AttributeList::from_ids`]. Names are taken left to right;
/// [`finish`](IdBinder::finish) requires every name to have been used.
#[derive(Debug)]
pub struct IdBinder<'a> {
    rest: Option<&'a str>,
    list: AttributeList<'a>,
}

impl<'a> IdBinder<'a> {
    /// Bind the next field, named by the next identifier.
    #[inline]
    pub fn bind<T: Convert>(self, value: &'a mut T) -> Result<Self> {
        self.bind_with(value, Native)
    }

    /// Bind the next field with an explicit convertor.
    pub fn bind_with<T, C>(mut self, value: &'a mut T, convertor: C) -> Result<Self>
    where
        T: 'a,
        C: Convertor<T> + 'a,
    {
        let index = self.list.len();
        let Some(name) = next_id(&mut self.rest) else {
            log::debug!(target: "fieldcast", "no identifier left for field #{index}");
            return MissingIdentifierSnafu { index }.fail();
        };
        self.list = self.list.field_with(name, value, convertor);
        Ok(self)
    }

    /// End registration. Fails if identifiers remain unbound.
    pub fn finish(self) -> Result<AttributeList<'a>> {
        let count = self.rest.map_or(0, |rest| {
            rest.split(ID_DELIMITER)
                .filter(|id| !id.trim().is_empty())
                .count()
        });
        if count > 0 {
            log::debug!(target: "fieldcast", "{count} identifier(s) left unbound");
            return UnboundIdentifiersSnafu { count }.fail();
        }
        Ok(self.list)
    }
}

/// Split the first name off an identifier string.
///
/// `None` in `rest` marks the string as exhausted; a blank string holds no
/// names at all. A blank name between two delimiters is never bound.
fn next_id<'a>(rest: &mut Option<&'a str>) -> Option<&'a str> {
    let ids = rest.take()?;
    if ids.trim().is_empty() {
        return None;
    }
    let head = match ids.split_once(ID_DELIMITER) {
        Some((head, tail)) => {
            *rest = Some(tail);
            head.trim()
        }
        None => ids.trim(),
    };
    (!head.is_empty()).then_some(head)
}

/// Types that expose their fields as an [`AttributeList`].
///
/// Usually derived; by hand, [`attributes!`](crate::attributes) names each
/// field after its path.
pub trait Serializable {
    /// Borrow every encoded field, in wire order.
    fn attributes(&mut self) -> AttributeList<'_>;
}

/// Build an [`AttributeList`] from field paths, naming each after itself.
///
/// ```
/// use fieldcast::{AttributeList, Serializable, attributes};
///
/// struct Point { x: i32, y: i32 }
///
/// impl Serializable for Point {
///     fn attributes(&mut self) -> AttributeList<'_> {
///         attributes!(self; x, y)
///     }
/// }
///
/// let mut p = Point { x: 1, y: 2 };
/// assert_eq!(p.attributes().names().collect::<Vec<_>>(), ["x", "y"]);
/// ```
#[macro_export]
macro_rules! attributes {
    ($obj:ident; $($field:ident),* $(,)?) => {
        $crate::AttributeList::new()
            $(.field(::core::stringify!($field), &mut $obj.$field))*
    };
}
