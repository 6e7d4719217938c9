use core::cell::Cell;
use std::{boxed::Box, rc::Rc, string::String, sync::Arc, vec, vec::Vec};

use crate::{
    AttributeList, ByteCursor, ByteReader, BytesError, Convert, ConvertExt, Convertor, Kind,
    Native, Result, deserialize, serialize,
};

std::thread_local! {
    static LIVE: Cell<usize> = const { Cell::new(0) };
}

fn live() -> usize {
    LIVE.with(Cell::get)
}

/// Pointee that counts its live instances on this thread.
#[derive(Debug)]
struct Tracked(u32);

impl Tracked {
    fn new(value: u32) -> Self {
        LIVE.with(|n| n.set(n.get() + 1));
        Self(value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        LIVE.with(|n| n.set(n.get() - 1));
    }
}

impl Convert for Tracked {
    const KIND: Kind = Kind::Value;
    const MAX_SIZE: Option<usize> = Some(4);

    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        self.0.encode(cursor)
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        u32::decode(reader).map(Tracked::new)
    }
}

#[test]
fn box_encodes_pointee_only() {
    let boxed = Box::new(0x0A0Bu16);
    assert_eq!(boxed.to_vec().unwrap(), [0x0B, 0x0A]);
    let (back, _) = Box::<u16>::from_slice(&[1, 0]).unwrap();
    assert_eq!(*back, 1);
}

#[test]
fn shared_pointers_decode_unshared() {
    let shared = Rc::new(String::from("s"));
    let alias = Rc::clone(&shared);
    let bytes = shared.to_vec().unwrap();

    let (back, _) = Rc::<String>::from_slice(&bytes).unwrap();
    assert_eq!(*back, *alias);
    assert_eq!(Rc::strong_count(&back), 1);

    let (back, _) = Arc::<String>::from_slice(&bytes).unwrap();
    assert_eq!(back.as_str(), "s");
}

#[test]
fn redecode_releases_previous_pointee() {
    let before = live();
    let mut buf = Vec::new();
    {
        let mut src = Some(Box::new(Tracked::new(5)));
        serialize(&mut buf, 0, &mut [&mut src]).unwrap();
    }
    assert_eq!(live(), before);

    let mut dst: Option<Box<Tracked>> = None;
    deserialize(&buf, 0, &mut [&mut dst]).unwrap();
    deserialize(&buf, 0, &mut [&mut dst]).unwrap();
    assert_eq!(live(), before + 1);
    assert_eq!(dst.as_ref().map(|t| t.0), Some(5));

    drop(dst);
    assert_eq!(live(), before);
}

#[test]
fn redecode_through_attribute_list() {
    let before = live();
    let mut buf = Vec::new();
    let mut id = 1u8;
    let mut head = Some(Box::new(Tracked::new(9)));
    serialize(
        &mut buf,
        0,
        &mut [&mut AttributeList::new().field("id", &mut id).field("head", &mut head)],
    )
    .unwrap();

    for _ in 0..2 {
        deserialize(
            &buf,
            0,
            &mut [&mut AttributeList::new().field("id", &mut id).field("head", &mut head)],
        )
        .unwrap();
    }
    assert_eq!(live(), before + 1);

    drop(head);
    assert_eq!(live(), before);
}

#[test]
fn null_pointer_roundtrip() {
    let mut src: Option<Box<Tracked>> = None;
    let mut buf = Vec::new();
    serialize(&mut buf, 0, &mut [&mut src]).unwrap();
    assert_eq!(buf, [0]);

    let mut dst = Some(Box::new(Tracked::new(3)));
    deserialize(&buf, 0, &mut [&mut dst]).unwrap();
    assert!(dst.is_none());
}

#[test]
fn failed_redecode_leaves_slot_released() {
    let before = live();
    let mut dst = Some(Box::new(Tracked::new(1)));
    let truncated = [1u8, 0xAA, 0xBB];

    let err = deserialize(&truncated, 0, &mut [&mut dst]).unwrap_err();
    assert_eq!(
        err,
        BytesError::UnexpectedEof {
            needed: 4,
            available: 2
        }
    );
    assert!(dst.is_none());
    assert_eq!(live(), before);
}

#[test]
fn vector_of_pointers_roundtrip() {
    let src = vec![Some(Box::new(1u32)), None, Some(Box::new(3))];
    let bytes = src.to_vec().unwrap();
    assert_eq!(bytes.len(), 8 + 5 + 1 + 5);
    let (back, _) = Vec::<Option<Box<u32>>>::from_slice(&bytes).unwrap();
    assert_eq!(back, src);
}

struct Forwarding;

impl Convertor<Option<Box<Tracked>>> for Forwarding {
    fn kind(&self) -> Kind {
        Kind::Pointer
    }

    fn encode(&self, value: &Option<Box<Tracked>>, cursor: &mut ByteCursor<'_>) -> Result<()> {
        Native.encode(value, cursor)
    }

    fn decode(&self, reader: &mut ByteReader<'_>) -> Result<Option<Box<Tracked>>> {
        Native.decode(reader)
    }

    fn release(&self, value: &mut Option<Box<Tracked>>) {
        Native.release(value);
    }
}

#[test]
fn explicit_convertor_releases_before_decode() {
    let before = live();
    let mut head = Some(Box::new(Tracked::new(7)));
    let truncated = [1u8, 0xAA];

    let err = deserialize(
        &truncated,
        0,
        &mut [&mut AttributeList::new().field_with("head", &mut head, Forwarding)],
    )
    .unwrap_err();
    assert_eq!(
        err,
        BytesError::UnexpectedEof {
            needed: 4,
            available: 1
        }
    );
    assert!(head.is_none());
    assert_eq!(live(), before);
}

#[derive(Debug, PartialEq)]
struct Chain {
    value: u8,
    next: Option<Box<Chain>>,
}

impl Convert for Chain {
    const KIND: Kind = Kind::Value;
    const MAX_SIZE: Option<usize> = match <Option<Box<Chain>>>::MAX_SIZE {
        Some(next) => Some(1 + next),
        None => None,
    };

    fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        cursor.write(&self.value)?;
        cursor.write(&self.next)
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Chain {
            value: reader.read()?,
            next: reader.read()?,
        })
    }

    fn byte_len(&self) -> Option<usize> {
        self.next.byte_len()?.checked_add(1)
    }
}

#[test]
fn self_referencing_type_has_unbounded_size() {
    assert_eq!(<Box<u32>>::MAX_SIZE, None);
    assert_eq!(<Rc<u32>>::MAX_SIZE, None);
    assert_eq!(<Option<Box<u32>>>::MAX_SIZE, None);
    assert_eq!(Chain::MAX_SIZE, None);

    let src = Chain {
        value: 1,
        next: Some(Box::new(Chain { value: 2, next: None })),
    };
    let bytes = src.to_vec().unwrap();
    assert_eq!(bytes, [1, 1, 2, 0]);
    assert_eq!(src.byte_len(), Some(4));

    let (back, n) = Chain::from_slice(&bytes).unwrap();
    assert_eq!((back, n), (src, 4));
}
