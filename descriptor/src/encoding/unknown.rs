use crate::encoding::encoded_size::EncodedSize;
use crate::encoding::error::Error;
use crate::encoding::wire::{skip, Tag};
use crate::encoding::Encoder;
use bytes::{Buf, BufMut};

/// Raw bytes of every field a decoder did not recognize, tag included, in the
/// order they were read. Encoding replays them verbatim after the known fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UnknownFields {
    bytes: Vec<u8>,
}

impl UnknownFields {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Consumes the value following `tag` from `buf` and keeps it.
    pub fn capture<B>(&mut self, tag: &Tag, buf: &mut B) -> Result<(), Error>
    where
        B: Buf,
    {
        self.bytes.extend_from_slice(tag.as_bytes());
        let len = skip(buf, tag, &mut self.bytes)?;
        tracing::trace!(
            field = tag.field(),
            wire_type = %tag.wire_type(),
            len,
            "preserving unrecognized field"
        );
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn clear(&mut self) {
        self.bytes.clear()
    }
}

impl EncodedSize for UnknownFields {
    fn encoded_size(&self) -> usize {
        self.bytes.len()
    }
}

impl Encoder for UnknownFields {
    fn encode<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        buf.put_slice(&self.bytes);
    }
}
