use crate::catalog::column::ColumnDescriptor;
use crate::catalog::error::Error;
use crate::catalog::index::IndexDescriptor;
use crate::catalog::privilege::PrivilegeDescriptor;
use crate::catalog::{ColumnId, DescriptorId, IndexId};
use crate::encoding::unknown::UnknownFields;
use crate::encoding::Decoder;
use crate::error::DescriptorResult;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A table, stored under its own descriptor key. The table id is globally
/// unique while the ids of its columns and indexes are only unique within it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TableDescriptor {
    pub name: String,
    pub id: DescriptorId,
    pub columns: Vec<ColumnDescriptor>,
    /// Keeps deleted column ids from being handed out again.
    pub next_column_id: ColumnId,
    pub primary_index: IndexDescriptor,
    /// Secondary indexes.
    pub indexes: Vec<IndexDescriptor>,
    /// Keeps deleted index ids from being handed out again.
    pub next_index_id: IndexId,
    pub privileges: PrivilegeDescriptor,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl TableDescriptor {
    pub const EMPTY: TableDescriptor = TableDescriptor {
        name: String::new(),
        id: 0,
        columns: Vec::new(),
        next_column_id: 0,
        primary_index: IndexDescriptor::EMPTY,
        indexes: Vec::new(),
        next_index_id: 0,
        privileges: PrivilegeDescriptor::EMPTY,
        unknown_fields: UnknownFields::new(),
    };

    /// A shared zero-valued descriptor, for reading through lookups that
    /// found nothing.
    pub fn empty() -> &'static Self {
        static EMPTY: TableDescriptor = TableDescriptor::EMPTY;
        &EMPTY
    }

    pub fn new<T: Into<String>>(id: DescriptorId, name: T) -> Self {
        Self {
            name: name.into(),
            id,
            next_column_id: 1,
            next_index_id: 1,
            ..Self::default()
        }
    }

    pub fn with_privileges(mut self, privileges: PrivilegeDescriptor) -> Self {
        self.privileges = privileges;
        self
    }

    /// Decodes a stored table and checks it is well formed.
    pub fn unmarshal_validated(data: &[u8]) -> DescriptorResult<Self> {
        let table = Self::unmarshal(data)?;
        table.validate()?;
        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> DescriptorId {
        self.id
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn next_column_id(&self) -> ColumnId {
        self.next_column_id
    }

    pub fn primary_index(&self) -> &IndexDescriptor {
        &self.primary_index
    }

    pub fn indexes(&self) -> &[IndexDescriptor] {
        &self.indexes
    }

    pub fn next_index_id(&self) -> IndexId {
        self.next_index_id
    }

    pub fn privileges(&self) -> &PrivilegeDescriptor {
        &self.privileges
    }

    pub fn privileges_mut(&mut self) -> &mut PrivilegeDescriptor {
        &mut self.privileges
    }

    /// The primary index followed by the secondary indexes.
    pub fn all_indexes(&self) -> impl Iterator<Item = &IndexDescriptor> {
        std::iter::once(&self.primary_index).chain(self.indexes.iter())
    }

    pub fn find_column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.name() == name)
    }

    pub fn find_column_by_id(&self, id: ColumnId) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.id() == id)
    }

    pub fn find_index(&self, name: &str) -> Option<&IndexDescriptor> {
        self.all_indexes().find(|index| index.name() == name)
    }

    /// Appends `column` under the next unused column id and returns that id.
    pub fn add_column(&mut self, mut column: ColumnDescriptor) -> Result<ColumnId, Error> {
        if self.find_column(column.name()).is_some() {
            return Err(Error::Duplicated("column", column.name().to_string()));
        }
        let id = self.allocate_column_id()?;
        column.set_id(id);
        self.columns.push(column);
        Ok(id)
    }

    /// Appends a secondary index, resolving its column ids by name.
    pub fn add_index(&mut self, mut index: IndexDescriptor) -> Result<IndexId, Error> {
        if self.find_index(index.name()).is_some() {
            return Err(Error::Duplicated("index", index.name().to_string()));
        }
        self.resolve_index_columns(&mut index)?;
        index.id = self.allocate_index_id()?;
        let id = index.id;
        self.indexes.push(index);
        Ok(id)
    }

    /// Installs the primary index, resolving its column ids by name. The
    /// `unique` flag is stored exactly as given.
    pub fn set_primary_index(&mut self, mut index: IndexDescriptor) -> Result<IndexId, Error> {
        if self.indexes.iter().any(|other| other.name() == index.name()) {
            return Err(Error::Duplicated("index", index.name().to_string()));
        }
        self.resolve_index_columns(&mut index)?;
        index.id = self.allocate_index_id()?;
        let id = index.id;
        self.primary_index = index;
        Ok(id)
    }

    fn resolve_index_columns(&self, index: &mut IndexDescriptor) -> Result<(), Error> {
        if index.column_names.is_empty() {
            return Err(Error::Invalid(format!("index {} has no columns", index.name)));
        }
        index.column_ids = index
            .column_names
            .iter()
            .map(|name| {
                self.find_column(name)
                    .map(ColumnDescriptor::id)
                    .ok_or_else(|| Error::NotFound("column", name.clone()))
            })
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    fn allocate_column_id(&mut self) -> Result<ColumnId, Error> {
        let id = self.next_column_id.max(1);
        self.next_column_id = id
            .checked_add(1)
            .ok_or_else(|| Error::Invalid(format!("table {} ran out of column ids", self.name)))?;
        Ok(id)
    }

    fn allocate_index_id(&mut self) -> Result<IndexId, Error> {
        let id = self.next_index_id.max(1);
        self.next_index_id = id
            .checked_add(1)
            .ok_or_else(|| Error::Invalid(format!("table {} ran out of index ids", self.name)))?;
        Ok(id)
    }

    /// Checks the structural invariants the catalog relies on: unique column
    /// and index names and ids, counters ahead of every id in use, paired
    /// index column lists that point at existing columns, and a primary key.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.is_empty() {
            return Err(Error::Invalid("empty table name".to_string()));
        }
        if self.id == 0 {
            return Err(Error::Invalid(format!("invalid table id 0 for {}", self.name)));
        }
        if self.columns.is_empty() {
            return Err(Error::Invalid(format!("table {} has no columns", self.name)));
        }

        let mut column_names = HashSet::new();
        let mut column_ids = HashMap::new();
        for column in &self.columns {
            if column.name.is_empty() {
                return Err(Error::Invalid("empty column name".to_string()));
            }
            if !column_names.insert(column.name.as_str()) {
                return Err(Error::Duplicated("column", column.name.clone()));
            }
            if column.id == 0 {
                return Err(Error::Invalid(format!("invalid column id 0 for {}", column.name)));
            }
            if column_ids.insert(column.id, column.name.as_str()).is_some() {
                return Err(Error::Duplicated("column id", column.id.to_string()));
            }
            if column.id >= self.next_column_id {
                return Err(Error::Invalid(format!(
                    "column {} id {} not below next_column_id {}",
                    column.name, column.id, self.next_column_id
                )));
            }
        }

        if self.primary_index.column_names.is_empty() {
            return Err(Error::Invalid(format!(
                "table {} must contain a primary key",
                self.name
            )));
        }
        let mut index_names = HashSet::new();
        let mut index_ids = HashSet::new();
        for index in self.all_indexes() {
            if index.name.is_empty() {
                return Err(Error::Invalid("empty index name".to_string()));
            }
            if !index_names.insert(index.name.as_str()) {
                return Err(Error::Duplicated("index", index.name.clone()));
            }
            if index.id == 0 {
                return Err(Error::Invalid(format!("invalid index id 0 for {}", index.name)));
            }
            if !index_ids.insert(index.id) {
                return Err(Error::Duplicated("index id", index.id.to_string()));
            }
            if index.id >= self.next_index_id {
                return Err(Error::Invalid(format!(
                    "index {} id {} not below next_index_id {}",
                    index.name, index.id, self.next_index_id
                )));
            }
            if index.column_names.len() != index.column_ids.len() {
                return Err(Error::Invalid(format!(
                    "index {} has {} column names but {} column ids",
                    index.name,
                    index.column_names.len(),
                    index.column_ids.len()
                )));
            }
            for (name, id) in index.columns() {
                match column_ids.get(&id) {
                    None => return Err(Error::NotFound("column id", id.to_string())),
                    Some(column) if *column != name => {
                        return Err(Error::Invalid(format!(
                            "index {} names column {} but id {} belongs to {}",
                            index.name, name, id, column
                        )))
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}
