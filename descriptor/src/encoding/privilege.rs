use crate::catalog::privilege::PrivilegeDescriptor;
use crate::encoding::encoded_size::EncodedSize;
use crate::encoding::error::Error;
use crate::encoding::field::{decode_field, encode_repeated, repeated_len, Seen};
use crate::encoding::wire::Tag;
use crate::encoding::{Decoder, Encoder};
use bytes::{Buf, BufMut};

mod privilege_desc {
    pub const READ: u32 = 1;
    pub const WRITE: u32 = 2;
}

impl EncodedSize for PrivilegeDescriptor {
    fn encoded_size(&self) -> usize {
        repeated_len(privilege_desc::READ, &self.read)
            + repeated_len(privilege_desc::WRITE, &self.write)
            + self.unknown_fields.encoded_size()
    }
}

impl Encoder for PrivilegeDescriptor {
    fn encode<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        encode_repeated(privilege_desc::READ, &self.read, buf);
        encode_repeated(privilege_desc::WRITE, &self.write, buf);
        self.unknown_fields.encode(buf);
    }
}

impl Decoder for PrivilegeDescriptor {
    const REQUIRED: &'static [(u32, &'static str)] = &[];

    fn merge<B>(&mut self, buf: &mut B) -> Result<Seen, Error>
    where
        B: Buf,
    {
        let mut seen = Seen::default();
        while buf.has_remaining() {
            let tag = Tag::decode(buf)?;
            match tag.field() {
                privilege_desc::READ => self
                    .read
                    .push(decode_field(&tag, "PrivilegeDescriptor.read", buf)?),
                privilege_desc::WRITE => self
                    .write
                    .push(decode_field(&tag, "PrivilegeDescriptor.write", buf)?),
                _ => self.unknown_fields.capture(&tag, buf)?,
            }
            seen.mark(tag.field());
        }
        Ok(seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_privileges() {
        let mut privileges = PrivilegeDescriptor::with_users(["root"]);
        privileges.grant_read("root");
        let bytes = privileges.marshal();
        assert_eq!(
            bytes,
            b"\x0a\x04root\x0a\x04root\x12\x04root".to_vec()
        );
        let decoded = PrivilegeDescriptor::unmarshal(&bytes).unwrap();
        assert_eq!(decoded.read(), ["root", "root"]);
        assert_eq!(decoded, privileges);
    }

    #[test]
    fn empty_privileges_encode_to_nothing() {
        assert!(PrivilegeDescriptor::new().marshal().is_empty());
        assert_eq!(
            PrivilegeDescriptor::unmarshal(&[]).unwrap(),
            PrivilegeDescriptor::new()
        );
    }
}
