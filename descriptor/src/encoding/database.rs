use crate::catalog::database::DatabaseDescriptor;
use crate::encoding::encoded_size::EncodedSize;
use crate::encoding::error::Error;
use crate::encoding::field::{decode_field, encode_field, field_len, merge_field, Seen};
use crate::encoding::wire::Tag;
use crate::encoding::{Decoder, Encoder};
use bytes::{Buf, BufMut};

mod database_desc {
    pub const NAME: u32 = 1;
    pub const ID: u32 = 2;
    pub const PRIVILEGES: u32 = 3;
}

impl EncodedSize for DatabaseDescriptor {
    fn encoded_size(&self) -> usize {
        field_len(database_desc::NAME, &self.name)
            + field_len(database_desc::ID, &self.id)
            + field_len(database_desc::PRIVILEGES, &self.privileges)
            + self.unknown_fields.encoded_size()
    }
}

impl Encoder for DatabaseDescriptor {
    fn encode<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        encode_field(database_desc::NAME, &self.name, buf);
        encode_field(database_desc::ID, &self.id, buf);
        encode_field(database_desc::PRIVILEGES, &self.privileges, buf);
        self.unknown_fields.encode(buf);
    }
}

impl Decoder for DatabaseDescriptor {
    const REQUIRED: &'static [(u32, &'static str)] = &[
        (database_desc::NAME, "DatabaseDescriptor.name"),
        (database_desc::ID, "DatabaseDescriptor.id"),
        (database_desc::PRIVILEGES, "DatabaseDescriptor.privileges"),
    ];

    fn merge<B>(&mut self, buf: &mut B) -> Result<Seen, Error>
    where
        B: Buf,
    {
        let mut seen = Seen::default();
        while buf.has_remaining() {
            let tag = Tag::decode(buf)?;
            match tag.field() {
                database_desc::NAME => {
                    self.name = decode_field(&tag, "DatabaseDescriptor.name", buf)?
                }
                database_desc::ID => self.id = decode_field(&tag, "DatabaseDescriptor.id", buf)?,
                database_desc::PRIVILEGES => merge_field(
                    &tag,
                    "DatabaseDescriptor.privileges",
                    buf,
                    &mut self.privileges,
                )?,
                _ => self.unknown_fields.capture(&tag, buf)?,
            }
            seen.mark(tag.field());
        }
        Ok(seen)
    }
}
