use crate::{ByteCursor, ByteReader, Convert, Kind, Result};

// Fixed-width integers, little endian.
macro_rules! impl_convert_for_int {
    ($($ty:ty),+) => {
        $(
            impl Convert for $ty {
                const KIND: Kind = Kind::Value;
                const MAX_SIZE: Option<usize> = Some(core::mem::size_of::<$ty>());

                #[inline]
                fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
                    cursor.append(&self.to_le_bytes())
                }

                #[inline]
                fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
                    Ok(<$ty>::from_le_bytes(reader.take_array()?))
                }
            }
        )+
    };
}

impl_convert_for_int!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

// Tuples encode their elements in order.
macro_rules! impl_convert_for_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Convert),+> Convert for ($($name,)+) {
            const KIND: Kind = Kind::Value;
            const MAX_SIZE: Option<usize> = {
                let total = Some(0);
                $(let total = super::add_max(total, $name::MAX_SIZE);)+
                total
            };

            #[inline]
            fn encode(&self, cursor: &mut ByteCursor<'_>) -> Result<()> {
                $(self.$idx.encode(cursor)?;)+
                Ok(())
            }

            #[inline]
            fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
                Ok(($($name::decode(reader)?,)+))
            }

            fn decode_into(&mut self, reader: &mut ByteReader<'_>) -> Result<()> {
                $(self.$idx.decode_into(reader)?;)+
                Ok(())
            }

            fn byte_len(&self) -> Option<usize> {
                Some(0 $(+ self.$idx.byte_len()?)+)
            }
        }
    };
}

impl_convert_for_tuple!(A 0);
impl_convert_for_tuple!(A 0, B 1);
impl_convert_for_tuple!(A 0, B 1, C 2);
impl_convert_for_tuple!(A 0, B 1, C 2, D 3);
impl_convert_for_tuple!(A 0, B 1, C 2, D 3, E 4);
impl_convert_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
impl_convert_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_convert_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
