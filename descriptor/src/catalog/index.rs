use crate::catalog::{ColumnId, IndexId};
use crate::encoding::unknown::UnknownFields;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexDescriptor {
    pub name: String,
    pub id: IndexId,
    pub unique: bool,
    /// Ordered names of the indexed columns, parallel to `column_ids`.
    pub column_names: Vec<String>,
    /// Ordered ids of the indexed columns, parallel to `column_names`.
    pub column_ids: Vec<ColumnId>,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl IndexDescriptor {
    pub const EMPTY: IndexDescriptor = IndexDescriptor {
        name: String::new(),
        id: 0,
        unique: false,
        column_names: Vec::new(),
        column_ids: Vec::new(),
        unknown_fields: UnknownFields::new(),
    };

    /// A shared zero-valued descriptor, for reading through lookups that
    /// found nothing.
    pub fn empty() -> &'static Self {
        static EMPTY: IndexDescriptor = IndexDescriptor::EMPTY;
        &EMPTY
    }

    /// An index over `column_names`; ids are filled in once the index is
    /// attached to a table.
    pub fn new<T, I, S>(name: T, unique: bool, column_names: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            unique,
            column_names: column_names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> IndexId {
        self.id
    }

    pub fn unique(&self) -> bool {
        self.unique
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn column_ids(&self) -> &[ColumnId] {
        &self.column_ids
    }

    /// `(name, id)` pairs in key order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, ColumnId)> + '_ {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.column_ids.iter().copied())
    }

    pub fn contains_column(&self, id: ColumnId) -> bool {
        self.column_ids.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_columns() {
        let mut index = IndexDescriptor::new("by_name", true, ["last", "first"]);
        assert!(index.column_ids().is_empty());
        index.column_ids = vec![3, 2];
        assert_eq!(
            index.columns().collect::<Vec<_>>(),
            vec![("last", 3), ("first", 2)]
        );
        assert!(index.contains_column(2));
        assert!(!index.contains_column(1));
    }

    #[test]
    fn empty_accessors() {
        let index = IndexDescriptor::EMPTY;
        assert_eq!(index.name(), "");
        assert_eq!(index.id(), 0);
        assert!(!index.unique());
        assert!(index.column_names().is_empty());
        assert_eq!(index.columns().count(), 0);
    }

    #[test]
    fn index_json_defaults() {
        let index: IndexDescriptor =
            serde_json::from_str(r#"{"name":"primary","unique":true}"#).unwrap();
        assert_eq!(index.name(), "primary");
        assert!(index.unique());
        assert!(index.column_ids().is_empty());
    }
}
