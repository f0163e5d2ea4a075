use crate::catalog::column::{ColumnDescriptor, ColumnType};
use crate::encoding::encoded_size::EncodedSize;
use crate::encoding::error::Error;
use crate::encoding::field::{decode_field, encode_field, field_len, merge_field, Seen};
use crate::encoding::wire::Tag;
use crate::encoding::{Decoder, Encoder};
use bytes::{Buf, BufMut};

mod column_type {
    pub const KIND: u32 = 1;
    pub const WIDTH: u32 = 2;
    pub const PRECISION: u32 = 3;
}

mod column_desc {
    pub const NAME: u32 = 1;
    pub const ID: u32 = 2;
    pub const TYPE: u32 = 3;
    pub const NULLABLE: u32 = 4;
}

impl EncodedSize for ColumnType {
    fn encoded_size(&self) -> usize {
        field_len(column_type::KIND, &self.kind)
            + field_len(column_type::WIDTH, &self.width)
            + field_len(column_type::PRECISION, &self.precision)
            + self.unknown_fields.encoded_size()
    }
}

impl Encoder for ColumnType {
    fn encode<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        encode_field(column_type::KIND, &self.kind, buf);
        encode_field(column_type::WIDTH, &self.width, buf);
        encode_field(column_type::PRECISION, &self.precision, buf);
        self.unknown_fields.encode(buf);
    }
}

impl Decoder for ColumnType {
    const REQUIRED: &'static [(u32, &'static str)] = &[
        (column_type::KIND, "ColumnType.kind"),
        (column_type::WIDTH, "ColumnType.width"),
        (column_type::PRECISION, "ColumnType.precision"),
    ];

    fn merge<B>(&mut self, buf: &mut B) -> Result<Seen, Error>
    where
        B: Buf,
    {
        let mut seen = Seen::default();
        while buf.has_remaining() {
            let tag = Tag::decode(buf)?;
            match tag.field() {
                column_type::KIND => self.kind = decode_field(&tag, "ColumnType.kind", buf)?,
                column_type::WIDTH => self.width = decode_field(&tag, "ColumnType.width", buf)?,
                column_type::PRECISION => {
                    self.precision = decode_field(&tag, "ColumnType.precision", buf)?
                }
                _ => self.unknown_fields.capture(&tag, buf)?,
            }
            seen.mark(tag.field());
        }
        Ok(seen)
    }
}

impl EncodedSize for ColumnDescriptor {
    fn encoded_size(&self) -> usize {
        field_len(column_desc::NAME, &self.name)
            + field_len(column_desc::ID, &self.id)
            + field_len(column_desc::TYPE, &self.column_type)
            + field_len(column_desc::NULLABLE, &self.nullable)
            + self.unknown_fields.encoded_size()
    }
}

impl Encoder for ColumnDescriptor {
    fn encode<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        encode_field(column_desc::NAME, &self.name, buf);
        encode_field(column_desc::ID, &self.id, buf);
        encode_field(column_desc::TYPE, &self.column_type, buf);
        encode_field(column_desc::NULLABLE, &self.nullable, buf);
        self.unknown_fields.encode(buf);
    }
}

impl Decoder for ColumnDescriptor {
    const REQUIRED: &'static [(u32, &'static str)] = &[
        (column_desc::NAME, "ColumnDescriptor.name"),
        (column_desc::ID, "ColumnDescriptor.id"),
        (column_desc::TYPE, "ColumnDescriptor.type"),
        (column_desc::NULLABLE, "ColumnDescriptor.nullable"),
    ];

    fn merge<B>(&mut self, buf: &mut B) -> Result<Seen, Error>
    where
        B: Buf,
    {
        let mut seen = Seen::default();
        while buf.has_remaining() {
            let tag = Tag::decode(buf)?;
            match tag.field() {
                column_desc::NAME => self.name = decode_field(&tag, "ColumnDescriptor.name", buf)?,
                column_desc::ID => self.id = decode_field(&tag, "ColumnDescriptor.id", buf)?,
                column_desc::TYPE => {
                    merge_field(&tag, "ColumnDescriptor.type", buf, &mut self.column_type)?
                }
                column_desc::NULLABLE => {
                    self.nullable = decode_field(&tag, "ColumnDescriptor.nullable", buf)?
                }
                _ => self.unknown_fields.capture(&tag, buf)?,
            }
            seen.mark(tag.field());
        }
        Ok(seen)
    }
}
