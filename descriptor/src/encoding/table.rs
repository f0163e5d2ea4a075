use crate::catalog::table::TableDescriptor;
use crate::encoding::encoded_size::EncodedSize;
use crate::encoding::error::Error;
use crate::encoding::field::{
    decode_field, encode_field, encode_repeated, field_len, merge_field, repeated_len, Seen,
};
use crate::encoding::wire::Tag;
use crate::encoding::{Decoder, Encoder};
use bytes::{Buf, BufMut};

mod table_desc {
    pub const NAME: u32 = 1;
    pub const ID: u32 = 2;
    pub const COLUMNS: u32 = 3;
    pub const NEXT_COLUMN_ID: u32 = 4;
    pub const PRIMARY_INDEX: u32 = 5;
    pub const INDEXES: u32 = 6;
    pub const NEXT_INDEX_ID: u32 = 7;
    pub const PRIVILEGES: u32 = 8;
}

impl EncodedSize for TableDescriptor {
    fn encoded_size(&self) -> usize {
        field_len(table_desc::NAME, &self.name)
            + field_len(table_desc::ID, &self.id)
            + repeated_len(table_desc::COLUMNS, &self.columns)
            + field_len(table_desc::NEXT_COLUMN_ID, &self.next_column_id)
            + field_len(table_desc::PRIMARY_INDEX, &self.primary_index)
            + repeated_len(table_desc::INDEXES, &self.indexes)
            + field_len(table_desc::NEXT_INDEX_ID, &self.next_index_id)
            + field_len(table_desc::PRIVILEGES, &self.privileges)
            + self.unknown_fields.encoded_size()
    }
}

impl Encoder for TableDescriptor {
    fn encode<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        encode_field(table_desc::NAME, &self.name, buf);
        encode_field(table_desc::ID, &self.id, buf);
        encode_repeated(table_desc::COLUMNS, &self.columns, buf);
        encode_field(table_desc::NEXT_COLUMN_ID, &self.next_column_id, buf);
        encode_field(table_desc::PRIMARY_INDEX, &self.primary_index, buf);
        encode_repeated(table_desc::INDEXES, &self.indexes, buf);
        encode_field(table_desc::NEXT_INDEX_ID, &self.next_index_id, buf);
        encode_field(table_desc::PRIVILEGES, &self.privileges, buf);
        self.unknown_fields.encode(buf);
    }
}

impl Decoder for TableDescriptor {
    const REQUIRED: &'static [(u32, &'static str)] = &[
        (table_desc::NAME, "TableDescriptor.name"),
        (table_desc::ID, "TableDescriptor.id"),
        (table_desc::NEXT_COLUMN_ID, "TableDescriptor.next_column_id"),
        (table_desc::PRIMARY_INDEX, "TableDescriptor.primary_index"),
        (table_desc::NEXT_INDEX_ID, "TableDescriptor.next_index_id"),
        (table_desc::PRIVILEGES, "TableDescriptor.privileges"),
    ];

    fn merge<B>(&mut self, buf: &mut B) -> Result<Seen, Error>
    where
        B: Buf,
    {
        let mut seen = Seen::default();
        while buf.has_remaining() {
            let tag = Tag::decode(buf)?;
            match tag.field() {
                table_desc::NAME => self.name = decode_field(&tag, "TableDescriptor.name", buf)?,
                table_desc::ID => self.id = decode_field(&tag, "TableDescriptor.id", buf)?,
                table_desc::COLUMNS => self
                    .columns
                    .push(decode_field(&tag, "TableDescriptor.columns", buf)?),
                table_desc::NEXT_COLUMN_ID => {
                    self.next_column_id =
                        decode_field(&tag, "TableDescriptor.next_column_id", buf)?
                }
                table_desc::PRIMARY_INDEX => merge_field(
                    &tag,
                    "TableDescriptor.primary_index",
                    buf,
                    &mut self.primary_index,
                )?,
                table_desc::INDEXES => self
                    .indexes
                    .push(decode_field(&tag, "TableDescriptor.indexes", buf)?),
                table_desc::NEXT_INDEX_ID => {
                    self.next_index_id = decode_field(&tag, "TableDescriptor.next_index_id", buf)?
                }
                table_desc::PRIVILEGES => {
                    merge_field(&tag, "TableDescriptor.privileges", buf, &mut self.privileges)?
                }
                _ => self.unknown_fields.capture(&tag, buf)?,
            }
            seen.mark(tag.field());
        }
        Ok(seen)
    }
}
