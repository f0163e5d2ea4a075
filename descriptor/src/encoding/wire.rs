//! Tag, varint and framing primitives shared by every descriptor codec.
//!
//! A tag is the varint `(field_number << 3) | wire_type`. Signed integers are
//! written as their sign-extended two's complement bit pattern, so a negative
//! `i32` always occupies [`MAX_VARINT_LEN`] bytes.

use crate::encoding::error::Error;
use crate::encoding::{MAX_VARINT_LEN, RECURSION_LIMIT};
use bytes::{Buf, BufMut};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

impl TryFrom<u8> for WireType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => WireType::Varint,
            1 => WireType::Fixed64,
            2 => WireType::LengthDelimited,
            3 => WireType::StartGroup,
            4 => WireType::EndGroup,
            5 => WireType::Fixed32,
            other => return Err(Error::IllegalWireType(other)),
        })
    }
}

impl Display for WireType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

pub fn encode_varint<B>(mut value: u64, buf: &mut B)
where
    B: BufMut,
{
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

pub fn decode_varint<B>(buf: &mut B) -> Result<u64, Error>
where
    B: Buf,
{
    read_varint(buf, |_| {})
}

#[inline]
pub fn encoded_len_varint(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}

/// Decodes a varint, handing every consumed byte to `on_byte`.
fn read_varint<B, F>(buf: &mut B, mut on_byte: F) -> Result<u64, Error>
where
    B: Buf,
    F: FnMut(u8),
{
    let mut value = 0u64;
    for i in 0..MAX_VARINT_LEN {
        if !buf.has_remaining() {
            return Err(Error::UnexpectedEof);
        }
        let byte = buf.get_u8();
        on_byte(byte);
        // The tenth byte only has room for bit 63.
        if i == MAX_VARINT_LEN - 1 && byte > 1 {
            return Err(Error::VarintOverflow);
        }
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte < 0x80 {
            return Ok(value);
        }
    }
    Err(Error::VarintOverflow)
}

pub fn encode_key<B>(field: u32, wire_type: WireType, buf: &mut B)
where
    B: BufMut,
{
    encode_varint(u64::from(field) << 3 | wire_type as u64, buf)
}

#[inline]
pub fn key_len(field: u32) -> usize {
    encoded_len_varint(u64::from(field) << 3)
}

/// Reads a length prefix and checks the buffer holds that many bytes.
pub fn decode_len<B>(buf: &mut B) -> Result<usize, Error>
where
    B: Buf,
{
    let len = decode_varint(buf)?;
    if len > i64::MAX as u64 {
        return Err(Error::InvalidLength(len));
    }
    let len = usize::try_from(len).map_err(|_| Error::InvalidLength(len))?;
    if len > buf.remaining() {
        return Err(Error::UnexpectedEof);
    }
    Ok(len)
}

/// A decoded field key that remembers the exact bytes it was read from, so an
/// unrecognized field can be replayed without re-encoding its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    field: u32,
    wire_type: WireType,
    raw: [u8; MAX_VARINT_LEN],
    raw_len: usize,
}

impl Tag {
    pub fn decode<B>(buf: &mut B) -> Result<Self, Error>
    where
        B: Buf,
    {
        let mut raw = [0u8; MAX_VARINT_LEN];
        let mut raw_len = 0;
        let key = read_varint(buf, |byte| {
            raw[raw_len] = byte;
            raw_len += 1;
        })?;
        let wire_type = WireType::try_from((key & 0x7) as u8)?;
        let field = key >> 3;
        if field == 0 || field > u64::from(u32::MAX) {
            return Err(Error::InvalidFieldNumber(field));
        }
        Ok(Self {
            field: field as u32,
            wire_type,
            raw,
            raw_len,
        })
    }

    pub fn field(&self) -> u32 {
        self.field
    }

    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw[..self.raw_len]
    }

    pub fn expect(&self, wire_type: WireType, field: &'static str) -> Result<(), Error> {
        if self.wire_type != wire_type {
            return Err(Error::WrongWireType {
                field,
                wire_type: self.wire_type as u8,
            });
        }
        Ok(())
    }
}

/// Consumes the value that follows `tag`, appending every consumed byte to
/// `sink`, and returns how many bytes were consumed.
///
/// An end-group tag met outside of a group carries no payload and consumes
/// nothing.
pub fn skip<B>(buf: &mut B, tag: &Tag, sink: &mut Vec<u8>) -> Result<usize, Error>
where
    B: Buf,
{
    let start = sink.len();
    skip_value(buf, tag, sink, 0)?;
    Ok(sink.len() - start)
}

fn skip_value<B>(buf: &mut B, tag: &Tag, sink: &mut Vec<u8>, depth: usize) -> Result<(), Error>
where
    B: Buf,
{
    match tag.wire_type() {
        WireType::Varint => {
            read_varint(buf, |byte| sink.push(byte))?;
        }
        WireType::Fixed64 => copy_exact(buf, 8, sink)?,
        WireType::LengthDelimited => {
            let len = read_varint(buf, |byte| sink.push(byte))?;
            if len > i64::MAX as u64 {
                return Err(Error::InvalidLength(len));
            }
            let len = usize::try_from(len).map_err(|_| Error::InvalidLength(len))?;
            copy_exact(buf, len, sink)?;
        }
        WireType::StartGroup => {
            if depth >= RECURSION_LIMIT {
                return Err(Error::RecursionLimit(RECURSION_LIMIT));
            }
            loop {
                let inner = Tag::decode(buf)?;
                sink.extend_from_slice(inner.as_bytes());
                if inner.wire_type() == WireType::EndGroup {
                    if inner.field() != tag.field() {
                        return Err(Error::MismatchedGroup {
                            expected: tag.field(),
                            found: inner.field(),
                        });
                    }
                    break;
                }
                skip_value(buf, &inner, sink, depth + 1)?;
            }
        }
        WireType::EndGroup => {}
        WireType::Fixed32 => copy_exact(buf, 4, sink)?,
    }
    Ok(())
}

fn copy_exact<B>(buf: &mut B, mut len: usize, sink: &mut Vec<u8>) -> Result<(), Error>
where
    B: Buf,
{
    if buf.remaining() < len {
        return Err(Error::UnexpectedEof);
    }
    sink.reserve(len);
    while len > 0 {
        let chunk = buf.chunk();
        let n = chunk.len().min(len);
        sink.extend_from_slice(&chunk[..n]);
        buf.advance(n);
        len -= n;
    }
    Ok(())
}
