//! Schema catalog descriptors of a distributed SQL engine and the tag-based
//! binary codec they are stored with.
//!
//! Every descriptor implements [`Encoder`] and [`Decoder`]. Fields a decoder
//! does not recognize are kept in the descriptor's `unknown_fields` and written
//! back verbatim, so records from newer writers survive older readers.

pub mod catalog;
pub mod encoding;
pub mod error;
mod text;

pub use catalog::column::{ColumnDescriptor, ColumnKind, ColumnType};
pub use catalog::database::DatabaseDescriptor;
pub use catalog::index::IndexDescriptor;
pub use catalog::privilege::PrivilegeDescriptor;
pub use catalog::table::TableDescriptor;
pub use catalog::{ColumnId, DescriptorId, IndexId};
pub use encoding::encoded_size::EncodedSize;
pub use encoding::unknown::UnknownFields;
pub use encoding::{Decoder, Encoder};
pub use error::{DescriptorError, DescriptorResult};
