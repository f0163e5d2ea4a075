pub mod column;
pub mod database;
pub mod error;
pub mod index;
pub mod privilege;
pub mod table;

/// Identifier shared by tables and databases, allocated outside this crate.
pub type DescriptorId = u32;
/// Identifier of a column, unique within its table.
pub type ColumnId = u32;
/// Identifier of an index, unique within its table.
pub type IndexId = u32;
