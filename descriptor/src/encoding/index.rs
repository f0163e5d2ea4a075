use crate::catalog::index::IndexDescriptor;
use crate::encoding::encoded_size::EncodedSize;
use crate::encoding::error::Error;
use crate::encoding::field::{
    decode_field, encode_field, encode_repeated, field_len, repeated_len, Seen,
};
use crate::encoding::wire::Tag;
use crate::encoding::{Decoder, Encoder};
use bytes::{Buf, BufMut};

mod index_desc {
    pub const NAME: u32 = 1;
    pub const ID: u32 = 2;
    pub const UNIQUE: u32 = 3;
    pub const COLUMN_NAMES: u32 = 4;
    pub const COLUMN_IDS: u32 = 5;
}

impl EncodedSize for IndexDescriptor {
    fn encoded_size(&self) -> usize {
        field_len(index_desc::NAME, &self.name)
            + field_len(index_desc::ID, &self.id)
            + field_len(index_desc::UNIQUE, &self.unique)
            + repeated_len(index_desc::COLUMN_NAMES, &self.column_names)
            + repeated_len(index_desc::COLUMN_IDS, &self.column_ids)
            + self.unknown_fields.encoded_size()
    }
}

impl Encoder for IndexDescriptor {
    fn encode<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        encode_field(index_desc::NAME, &self.name, buf);
        encode_field(index_desc::ID, &self.id, buf);
        encode_field(index_desc::UNIQUE, &self.unique, buf);
        encode_repeated(index_desc::COLUMN_NAMES, &self.column_names, buf);
        encode_repeated(index_desc::COLUMN_IDS, &self.column_ids, buf);
        self.unknown_fields.encode(buf);
    }
}

impl Decoder for IndexDescriptor {
    const REQUIRED: &'static [(u32, &'static str)] = &[
        (index_desc::NAME, "IndexDescriptor.name"),
        (index_desc::ID, "IndexDescriptor.id"),
        (index_desc::UNIQUE, "IndexDescriptor.unique"),
    ];

    fn merge<B>(&mut self, buf: &mut B) -> Result<Seen, Error>
    where
        B: Buf,
    {
        let mut seen = Seen::default();
        while buf.has_remaining() {
            let tag = Tag::decode(buf)?;
            match tag.field() {
                index_desc::NAME => self.name = decode_field(&tag, "IndexDescriptor.name", buf)?,
                index_desc::ID => self.id = decode_field(&tag, "IndexDescriptor.id", buf)?,
                index_desc::UNIQUE => {
                    self.unique = decode_field(&tag, "IndexDescriptor.unique", buf)?
                }
                index_desc::COLUMN_NAMES => self
                    .column_names
                    .push(decode_field(&tag, "IndexDescriptor.column_names", buf)?),
                index_desc::COLUMN_IDS => self
                    .column_ids
                    .push(decode_field(&tag, "IndexDescriptor.column_ids", buf)?),
                _ => self.unknown_fields.capture(&tag, buf)?,
            }
            seen.mark(tag.field());
        }
        if self.column_names.len() != self.column_ids.len() {
            return Err(Error::UnpairedIndexColumns {
                names: self.column_names.len(),
                ids: self.column_ids.len(),
            });
        }
        Ok(seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary() -> IndexDescriptor {
        IndexDescriptor {
            name: "primary".to_string(),
            id: 1,
            unique: true,
            column_names: vec!["a".to_string(), "b".to_string()],
            column_ids: vec![1, 2],
            ..Default::default()
        }
    }

    #[test]
    fn encode_decode_index() {
        let index = primary();
        let bytes = index.marshal();
        assert_eq!(
            bytes,
            b"\x0a\x07primary\x10\x01\x18\x01\x22\x01a\x22\x01b\x28\x01\x28\x02".to_vec()
        );
        let decoded = IndexDescriptor::unmarshal(&bytes).unwrap();
        assert_eq!(decoded, index);
        assert_eq!(decoded.column_names().len(), decoded.column_ids().len());
    }

    #[test]
    fn empty_lists_write_nothing() {
        let index = IndexDescriptor {
            name: "i".to_string(),
            ..Default::default()
        };
        assert_eq!(index.marshal(), vec![0x0a, 0x01, b'i', 0x10, 0x00, 0x18, 0x00]);
        assert_eq!(IndexDescriptor::unmarshal(&index.marshal()).unwrap(), index);
    }

    #[test]
    fn interleaved_lists_keep_order() {
        // names and ids alternate on the wire; each list keeps its own order.
        let bytes = [
            0x0a, 0x01, b'i', 0x10, 0x03, 0x18, 0x00, 0x22, 0x01, b'x', 0x28, 0x07, 0x22, 0x01,
            b'y', 0x28, 0x05,
        ];
        let index = IndexDescriptor::unmarshal(&bytes).unwrap();
        assert_eq!(index.column_names(), ["x", "y"]);
        assert_eq!(index.column_ids(), [7, 5]);
    }

    #[test]
    fn unpaired_columns_rejected() {
        let mut index = primary();
        index.column_ids.pop();
        assert_eq!(
            IndexDescriptor::unmarshal(&index.marshal()),
            Err(Error::UnpairedIndexColumns { names: 2, ids: 1 })
        );
    }

    #[test]
    fn every_truncation_but_one_before_the_lists_is_rejected() {
        let index = IndexDescriptor {
            name: "primary".to_string(),
            id: 1,
            unique: true,
            column_names: vec!["a".to_string()],
            column_ids: vec![1],
            ..Default::default()
        };
        let bytes = index.marshal();
        assert_eq!(bytes.len(), 18);
        // The column lists may be empty, so a cut right before them still
        // reads as an index with no columns.
        let before_lists = 13;
        for cut in 0..bytes.len() {
            match IndexDescriptor::unmarshal(&bytes[..cut]) {
                Ok(decoded) => {
                    assert_eq!(cut, before_lists);
                    assert!(decoded.column_names().is_empty());
                    assert!(decoded.column_ids().is_empty());
                }
                Err(err) => assert!(err.is_truncated(), "cut at {cut}: {err}"),
            }
        }
        assert_eq!(
            IndexDescriptor::unmarshal(&bytes[..16]),
            Err(Error::UnpairedIndexColumns { names: 1, ids: 0 })
        );
    }

    #[test]
    fn packed_ids_rejected() {
        let mut bytes = IndexDescriptor::default().marshal();
        // column_ids as a packed length-delimited run
        bytes.extend_from_slice(&[0x2a, 0x02, 0x01, 0x02]);
        assert_eq!(
            IndexDescriptor::unmarshal(&bytes),
            Err(Error::WrongWireType {
                field: "IndexDescriptor.column_ids",
                wire_type: 2
            })
        );
    }
}
