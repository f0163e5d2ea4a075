use crate::encoding::encoded_size::EncodedSize;
use crate::encoding::error::Error;
use crate::encoding::field::Seen;
use bytes::{Buf, BufMut};

mod column;
mod database;
pub mod encoded_size;
pub mod error;
pub mod field;
mod index;
mod privilege;
mod table;
pub mod unknown;
pub mod wire;

/// Longest varint a 64-bit value can take.
pub const MAX_VARINT_LEN: usize = 10;
/// Deepest group nesting `wire::skip` will walk through.
pub const RECURSION_LIMIT: usize = 64;

pub trait Encoder: EncodedSize {
    fn encode<B>(&self, buf: &mut B)
    where
        B: BufMut;

    /// Serializes into a buffer of exactly `encoded_size()` bytes.
    fn marshal(&self) -> Vec<u8> {
        let size = self.encoded_size();
        let mut buf = Vec::with_capacity(size);
        self.encode(&mut buf);
        assert_eq!(
            buf.len(),
            size,
            "encoded {} bytes where encoded_size predicted {}",
            buf.len(),
            size
        );
        buf
    }
}

/// Decodes a message spanning every remaining byte of `buf`.
pub trait Decoder: Default {
    /// Singular fields every encoding of the message carries, checked once the
    /// whole top-level message has been read.
    const REQUIRED: &'static [(u32, &'static str)];

    /// Reads one encoded body over `self`. Scalars are overwritten, repeated
    /// fields and unknown bytes are appended, and nested messages are merged
    /// the same way. Returns the field numbers that were present.
    fn merge<B>(&mut self, buf: &mut B) -> Result<Seen, Error>
    where
        B: Buf;

    fn decode<B>(buf: &mut B) -> Result<Self, Error>
    where
        B: Buf,
    {
        let mut value = Self::default();
        value.merge(buf)?.require(Self::REQUIRED)?;
        Ok(value)
    }

    fn unmarshal(data: &[u8]) -> Result<Self, Error> {
        let mut buf = data;
        Self::decode(&mut buf).inspect_err(|err| {
            tracing::debug!(
                descriptor = std::any::type_name::<Self>(),
                len = data.len(),
                %err,
                "failed to unmarshal descriptor"
            )
        })
    }
}
