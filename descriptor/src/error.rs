use thiserror::Error;

pub type DescriptorResult<T> = Result<T, DescriptorError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("[Decode]: {0}")]
    Decode(#[from] crate::encoding::error::Error),
    #[error("[Catalog]: {0}")]
    Catalog(#[from] crate::catalog::error::Error),
}
