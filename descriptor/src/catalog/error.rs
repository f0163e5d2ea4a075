use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}: {1} duplicated")]
    Duplicated(&'static str, String),
    #[error("{0}: {1} not found")]
    NotFound(&'static str, String),
    #[error("{0}")]
    Invalid(String),
}
