use std::{boxed::Box, rc::Rc, string::String, vec::Vec};

use crate::{Blit, BytesError, Convert, ConvertExt, Kind, kind_of};

#[test]
fn integers_are_little_endian() {
    assert_eq!(0x0102_0304u32.to_vec().unwrap(), [4, 3, 2, 1]);
    assert_eq!((-2i16).to_vec().unwrap(), [0xFE, 0xFF]);
    assert_eq!(0xABu8.to_vec().unwrap(), [0xAB]);
    assert_eq!(u128::MAX.to_vec().unwrap().len(), 16);
}

#[test]
fn integers_roundtrip() {
    let (v, n) = i64::from_slice(&(-123_456_789i64).to_vec().unwrap()).unwrap();
    assert_eq!((v, n), (-123_456_789, 8));

    let (v, n) = u16::from_slice(&[0x34, 0x12, 0xFF]).unwrap();
    assert_eq!((v, n), (0x1234, 2));
}

#[test]
fn usize_travels_as_u64() {
    let bytes = 5usize.to_vec().unwrap();
    assert_eq!(bytes, [5, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(usize::from_slice(&bytes).unwrap(), (5, 8));

    let bytes = (-1isize).to_vec().unwrap();
    assert_eq!(bytes, [0xFF; 8]);
    assert_eq!(isize::from_slice(&bytes).unwrap(), (-1, 8));
}

#[test]
fn bool_accepts_only_zero_and_one() {
    assert_eq!(true.to_vec().unwrap(), [1]);
    assert_eq!(bool::from_slice(&[0]).unwrap(), (false, 1));
    assert_eq!(
        bool::from_slice(&[2]).unwrap_err(),
        BytesError::InvalidData {
            message: "bool must be 0 or 1"
        }
    );
}

#[test]
fn floats_keep_their_bits() {
    let (v, _) = f64::from_slice(&1.25f64.to_vec().unwrap()).unwrap();
    assert_eq!(v, 1.25);

    let nan = f32::from_bits(0x7FC0_0001);
    let (v, _) = f32::from_slice(&nan.to_vec().unwrap()).unwrap();
    assert_eq!(v.to_bits(), 0x7FC0_0001);
}

#[test]
fn char_rejects_surrogates() {
    assert_eq!(char::from_slice(&'é'.to_vec().unwrap()).unwrap(), ('é', 4));
    assert!(matches!(
        char::from_slice(&0xD800u32.to_le_bytes()),
        Err(BytesError::InvalidData { .. })
    ));
}

#[test]
fn unit_is_empty() {
    assert!(().to_vec().unwrap().is_empty());
    assert_eq!(<()>::MAX_SIZE, Some(0));
}

#[test]
fn tuple_fields_in_order() {
    let bytes = (1u8, -1i32, true).to_vec().unwrap();
    assert_eq!(bytes, [1, 0xFF, 0xFF, 0xFF, 0xFF, 1]);
    assert_eq!(<(u8, i32, bool)>::MAX_SIZE, Some(6));
    assert_eq!(<(u8, String)>::MAX_SIZE, None);

    let ((a, b, c), n) = <(u8, i32, bool)>::from_slice(&bytes).unwrap();
    assert_eq!((a, b, c, n), (1, -1, true, 6));
}

#[test]
fn option_is_tagged() {
    assert_eq!(None::<u16>.to_vec().unwrap(), [0]);
    assert_eq!(Some(7u16).to_vec().unwrap(), [1, 7, 0]);
    assert_eq!(<Option<u16>>::MAX_SIZE, Some(3));
    assert_eq!(
        <Option<u16>>::from_slice(&[2, 0, 0]).unwrap_err(),
        BytesError::InvalidData {
            message: "pointer tag must be 0 or 1"
        }
    );
}

#[test]
fn short_input_reports_eof() {
    assert_eq!(
        u32::from_slice(&[1, 2]).unwrap_err(),
        BytesError::UnexpectedEof {
            needed: 4,
            available: 2
        }
    );
}

#[test]
fn kinds_are_static() {
    assert_eq!(kind_of::<u32>(), Kind::Value);
    assert_eq!(kind_of::<(u8, f64)>(), Kind::Value);
    assert_eq!(kind_of::<String>(), Kind::String);
    assert_eq!(kind_of::<Option<Box<u8>>>(), Kind::Pointer);
    assert_eq!(kind_of::<Box<u8>>(), Kind::UniquePointer);
    assert_eq!(kind_of::<Rc<u8>>(), Kind::SharedPointer);
    assert_eq!(kind_of::<[u8; 4]>(), Kind::Array);
    assert_eq!(kind_of::<Vec<u8>>(), Kind::Container);
    assert_eq!(kind_of::<Blit<u32>>(), Kind::Blit);
}

#[test]
fn kind_predicates() {
    assert!(Kind::Pointer.is_nullable());
    assert!(!Kind::UniquePointer.is_nullable());
    assert!(Kind::SharedPointer.is_pointer());
    assert!(Kind::UniquePointer.is_owned_indirection());
    assert!(!Kind::Pointer.is_owned_indirection());
    assert!(Kind::String.is_sequence());
    assert!(!Kind::Value.is_sequence());
    assert_eq!(Kind::SharedPointer.as_str(), "shared pointer");
}
