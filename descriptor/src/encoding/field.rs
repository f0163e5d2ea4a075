use crate::catalog::column::{ColumnDescriptor, ColumnKind, ColumnType};
use crate::catalog::database::DatabaseDescriptor;
use crate::catalog::index::IndexDescriptor;
use crate::catalog::privilege::PrivilegeDescriptor;
use crate::catalog::table::TableDescriptor;
use crate::encoding::encoded_size::EncodedSize;
use crate::encoding::error::Error;
use crate::encoding::wire::{
    decode_len, decode_varint, encode_key, encode_varint, encoded_len_varint, key_len, Tag,
    WireType,
};
use crate::encoding::{Decoder, Encoder};
use bytes::{Buf, BufMut};

/// A value that can sit behind a single tag.
pub trait FieldValue: Sized {
    const WIRE_TYPE: WireType;

    /// Bytes written after the tag, length prefix included.
    fn value_len(&self) -> usize;

    fn encode_value<B>(&self, buf: &mut B)
    where
        B: BufMut;

    fn decode_value<B>(buf: &mut B, field: &'static str) -> Result<Self, Error>
    where
        B: Buf;
}

macro_rules! impl_varint_field {
    ($($ty:ty, $to_wire:expr, $from_wire:expr);+$(;)?) => {
        $(impl FieldValue for $ty {
            const WIRE_TYPE: WireType = WireType::Varint;

            #[inline]
            fn value_len(&self) -> usize {
                encoded_len_varint(($to_wire)(*self))
            }

            #[inline]
            fn encode_value<B>(&self, buf: &mut B)
            where
                B: BufMut,
            {
                encode_varint(($to_wire)(*self), buf)
            }

            #[inline]
            fn decode_value<B>(buf: &mut B, _field: &'static str) -> Result<Self, Error>
            where
                B: Buf,
            {
                decode_varint(buf).map($from_wire)
            }
        })+
    };
}

// Narrower integers keep the low bits of the decoded varint.
impl_varint_field! {
    u32, |v: u32| u64::from(v), |v: u64| v as u32;
    i32, |v: i32| v as i64 as u64, |v: u64| v as i32;
    bool, |v: bool| u64::from(v), |v: u64| v != 0;
    ColumnKind, |v: ColumnKind| v.value() as i64 as u64, |v: u64| ColumnKind::new(v as i32);
}

impl FieldValue for String {
    const WIRE_TYPE: WireType = WireType::LengthDelimited;

    fn value_len(&self) -> usize {
        self.delimited_size()
    }

    fn encode_value<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        encode_varint(self.len() as u64, buf);
        buf.put_slice(self.as_bytes());
    }

    fn decode_value<B>(buf: &mut B, field: &'static str) -> Result<Self, Error>
    where
        B: Buf,
    {
        let len = decode_len(buf)?;
        let bytes = buf.copy_to_bytes(len);
        String::from_utf8(bytes.to_vec()).map_err(|_| Error::InvalidUtf8(field))
    }
}

macro_rules! impl_message_field {
    ($($ty:ty);+$(;)?) => {
        $(impl FieldValue for $ty {
            const WIRE_TYPE: WireType = WireType::LengthDelimited;

            fn value_len(&self) -> usize {
                self.delimited_size()
            }

            fn encode_value<B>(&self, buf: &mut B)
            where
                B: BufMut,
            {
                encode_varint(self.encoded_size() as u64, buf);
                self.encode(buf);
            }

            fn decode_value<B>(buf: &mut B, _field: &'static str) -> Result<Self, Error>
            where
                B: Buf,
            {
                let mut value = <$ty>::default();
                merge_body(buf, &mut value)?;
                Ok(value)
            }
        })+
    };
}

impl_message_field! {
    ColumnType;
    ColumnDescriptor;
    IndexDescriptor;
    PrivilegeDescriptor;
    TableDescriptor;
    DatabaseDescriptor;
}

pub fn encode_field<T, B>(field: u32, value: &T, buf: &mut B)
where
    T: FieldValue,
    B: BufMut,
{
    encode_key(field, T::WIRE_TYPE, buf);
    value.encode_value(buf);
}

pub fn field_len<T: FieldValue>(field: u32, value: &T) -> usize {
    key_len(field) + value.value_len()
}

/// Writes one tag per element; an empty slice writes nothing.
pub fn encode_repeated<T, B>(field: u32, values: &[T], buf: &mut B)
where
    T: FieldValue,
    B: BufMut,
{
    for value in values {
        encode_field(field, value, buf);
    }
}

pub fn repeated_len<T: FieldValue>(field: u32, values: &[T]) -> usize {
    values.iter().map(|value| field_len(field, value)).sum()
}

pub fn decode_field<T, B>(tag: &Tag, field: &'static str, buf: &mut B) -> Result<T, Error>
where
    T: FieldValue,
    B: Buf,
{
    tag.expect(T::WIRE_TYPE, field)?;
    T::decode_value(buf, field)
}

/// Reads a message field into `value`, merging with whatever it already holds.
pub fn merge_field<T, B>(
    tag: &Tag,
    field: &'static str,
    buf: &mut B,
    value: &mut T,
) -> Result<(), Error>
where
    T: FieldValue + Decoder,
    B: Buf,
{
    tag.expect(T::WIRE_TYPE, field)?;
    merge_body(buf, value)
}

fn merge_body<T, B>(buf: &mut B, value: &mut T) -> Result<(), Error>
where
    T: Decoder,
    B: Buf,
{
    let len = decode_len(buf)?;
    let mut body = buf.copy_to_bytes(len);
    value.merge(&mut body).map(|_| ())
}

/// Field numbers met while reading one message body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Seen(u64);

impl Seen {
    /// Numbers past 63 belong to no known field and are not tracked.
    pub fn mark(&mut self, field: u32) {
        if field < 64 {
            self.0 |= 1 << field;
        }
    }

    pub fn contains(&self, field: u32) -> bool {
        field < 64 && self.0 & (1 << field) != 0
    }

    /// Singular fields are always written, so one that never showed up means
    /// the record was cut short.
    pub fn require(&self, fields: &[(u32, &'static str)]) -> Result<(), Error> {
        match fields.iter().find(|(field, _)| !self.contains(*field)) {
            Some((_, name)) => Err(Error::MissingField(*name)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded<T: FieldValue>(field: u32, value: &T) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_field(field, value, &mut buf);
        assert_eq!(buf.len(), field_len(field, value));
        buf
    }

    fn decoded<T: FieldValue>(data: &[u8]) -> Result<T, Error> {
        let mut buf = data;
        let tag = Tag::decode(&mut buf)?;
        decode_field(&tag, "test.field", &mut buf)
    }

    #[test]
    fn signed_fields_are_not_zigzagged() {
        let bytes = encoded(2, &-1i32);
        assert_eq!(bytes.len(), 1 + 10);
        assert_eq!(decoded::<i32>(&bytes), Ok(-1));
        assert_eq!(encoded(2, &1i32), vec![0x10, 0x01]);
    }

    #[test]
    fn unsigned_and_bool_fields() {
        assert_eq!(encoded(2, &u32::MAX), vec![0x10, 0xff, 0xff, 0xff, 0xff, 0x0f]);
        assert_eq!(decoded::<u32>(&encoded(2, &u32::MAX)), Ok(u32::MAX));
        assert_eq!(encoded(4, &true), vec![0x20, 0x01]);
        assert_eq!(encoded(4, &false), vec![0x20, 0x00]);
        // Any non-zero varint reads as true.
        assert_eq!(decoded::<bool>(&[0x20, 0x02]), Ok(true));
    }

    #[test]
    fn unknown_kind_survives() {
        let kind = ColumnKind::new(42);
        assert_eq!(decoded::<ColumnKind>(&encoded(1, &kind)), Ok(kind));
        let reserved = ColumnKind::new(6);
        assert_eq!(decoded::<ColumnKind>(&encoded(1, &reserved)), Ok(reserved));
    }

    #[test]
    fn string_fields() {
        let name = String::from("items");
        let bytes = encoded(1, &name);
        assert_eq!(bytes, b"\x0a\x05items".to_vec());
        assert_eq!(decoded::<String>(&bytes), Ok(name));
        assert_eq!(
            decoded::<String>(&[0x0a, 0x02, 0xc3, 0x28]),
            Err(Error::InvalidUtf8("test.field"))
        );
        assert_eq!(
            decoded::<String>(&[0x08, 0x01]),
            Err(Error::WrongWireType {
                field: "test.field",
                wire_type: 0
            })
        );
    }

    #[test]
    fn repeated_fields() {
        let users = vec![String::from("root"), String::from("admin")];
        let mut buf = Vec::new();
        encode_repeated(1, &users, &mut buf);
        assert_eq!(buf.len(), repeated_len(1, &users));
        assert_eq!(buf, b"\x0a\x04root\x0a\x05admin".to_vec());

        let mut empty = Vec::new();
        encode_repeated::<String, _>(1, &[], &mut empty);
        assert!(empty.is_empty());
        assert_eq!(repeated_len::<String>(1, &[]), 0);
    }

    #[test]
    fn seen_reports_first_missing_field() {
        let required = [(1, "ColumnType.kind"), (2, "ColumnType.width")];
        let mut seen = Seen::default();
        assert_eq!(
            seen.require(&required),
            Err(Error::MissingField("ColumnType.kind"))
        );
        seen.mark(1);
        seen.mark(99);
        assert!(!seen.contains(99));
        assert_eq!(
            seen.require(&required),
            Err(Error::MissingField("ColumnType.width"))
        );
        seen.mark(2);
        assert_eq!(seen.require(&required), Ok(()));
    }

    #[test]
    fn message_field_merges() {
        let mut privileges = PrivilegeDescriptor::with_users(["root"]);
        let mut buf = Vec::new();
        encode_field(3, &PrivilegeDescriptor::with_users(["admin"]), &mut buf);
        let mut data = buf.as_slice();
        let tag = Tag::decode(&mut data).unwrap();
        merge_field(&tag, "test.field", &mut data, &mut privileges).unwrap();
        assert_eq!(privileges.read(), ["root", "admin"]);
        assert_eq!(privileges.write(), ["root", "admin"]);
        assert!(!data.has_remaining());
    }
}
