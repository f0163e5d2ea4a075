use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unexpected end of buffer")]
    UnexpectedEof,
    #[error("{0} missing, record ends early")]
    MissingField(&'static str),
    #[error("invalid length {0} found during unmarshaling")]
    InvalidLength(u64),
    #[error("varint exceeds 10 bytes")]
    VarintOverflow,
    #[error("illegal wire type {0}")]
    IllegalWireType(u8),
    #[error("wrong wire type {wire_type} for field {field}")]
    WrongWireType { field: &'static str, wire_type: u8 },
    #[error("invalid field number {0}")]
    InvalidFieldNumber(u64),
    #[error("field {0} holds invalid utf-8")]
    InvalidUtf8(&'static str),
    #[error("end group for field {found} does not close group {expected}")]
    MismatchedGroup { expected: u32, found: u32 },
    #[error("index holds {names} column names but {ids} column ids")]
    UnpairedIndexColumns { names: usize, ids: usize },
    #[error("groups nested deeper than {0}")]
    RecursionLimit(usize),
}

impl Error {
    /// Whether the input was cut short, as opposed to holding bytes that
    /// cannot be parsed at all. Index column lists that stop pairing up are
    /// what a cut between a name and its id looks like.
    pub fn is_truncated(&self) -> bool {
        matches!(
            self,
            Error::UnexpectedEof | Error::MissingField(_) | Error::UnpairedIndexColumns { .. }
        )
    }
}
