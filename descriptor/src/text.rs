//! Single-line text rendering of descriptors, for logs and diagnostics.

use crate::catalog::column::{ColumnDescriptor, ColumnType};
use crate::catalog::database::DatabaseDescriptor;
use crate::catalog::index::IndexDescriptor;
use crate::catalog::privilege::PrivilegeDescriptor;
use crate::catalog::table::TableDescriptor;
use crate::encoding::unknown::UnknownFields;
use std::fmt::{self, Display, Formatter};

/// Writes `name:value` pairs separated by single spaces.
struct TextWriter<'a, 'b> {
    f: &'a mut Formatter<'b>,
    first: bool,
}

impl<'a, 'b> TextWriter<'a, 'b> {
    fn new(f: &'a mut Formatter<'b>) -> Self {
        Self { f, first: true }
    }

    fn separator(&mut self) -> fmt::Result {
        if !self.first {
            self.f.write_str(" ")?;
        }
        self.first = false;
        Ok(())
    }

    fn scalar(&mut self, name: &str, value: impl Display) -> fmt::Result {
        self.separator()?;
        write!(self.f, "{name}:{value}")
    }

    fn string(&mut self, name: &str, value: &str) -> fmt::Result {
        self.separator()?;
        write!(self.f, "{name}:{value:?}")
    }

    fn strings(&mut self, name: &str, values: &[String]) -> fmt::Result {
        values.iter().try_for_each(|value| self.string(name, value))
    }

    fn message(&mut self, name: &str, value: &impl Display) -> fmt::Result {
        self.separator()?;
        let body = value.to_string();
        if body.is_empty() {
            write!(self.f, "{name}:<>")
        } else {
            write!(self.f, "{name}:<{body} >")
        }
    }

    fn messages<T: Display>(&mut self, name: &str, values: &[T]) -> fmt::Result {
        values.iter().try_for_each(|value| self.message(name, value))
    }

    fn unknown(&mut self, unknown_fields: &UnknownFields) -> fmt::Result {
        if unknown_fields.is_empty() {
            return Ok(());
        }
        self.separator()?;
        write!(self.f, "/* {} unknown bytes */", unknown_fields.len())
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = TextWriter::new(f);
        w.scalar("kind", self.kind)?;
        w.scalar("width", self.width)?;
        w.scalar("precision", self.precision)?;
        w.unknown(&self.unknown_fields)
    }
}

impl Display for ColumnDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = TextWriter::new(f);
        w.string("name", &self.name)?;
        w.scalar("id", self.id)?;
        w.message("type", &self.column_type)?;
        w.scalar("nullable", self.nullable)?;
        w.unknown(&self.unknown_fields)
    }
}

impl Display for IndexDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = TextWriter::new(f);
        w.string("name", &self.name)?;
        w.scalar("id", self.id)?;
        w.scalar("unique", self.unique)?;
        w.strings("column_names", &self.column_names)?;
        for id in &self.column_ids {
            w.scalar("column_ids", id)?;
        }
        w.unknown(&self.unknown_fields)
    }
}

impl Display for PrivilegeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = TextWriter::new(f);
        w.strings("read", &self.read)?;
        w.strings("write", &self.write)?;
        w.unknown(&self.unknown_fields)
    }
}

impl Display for TableDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = TextWriter::new(f);
        w.string("name", &self.name)?;
        w.scalar("id", self.id)?;
        w.messages("columns", &self.columns)?;
        w.scalar("next_column_id", self.next_column_id)?;
        w.message("primary_index", &self.primary_index)?;
        w.messages("indexes", &self.indexes)?;
        w.scalar("next_index_id", self.next_index_id)?;
        w.message("privileges", &self.privileges)?;
        w.unknown(&self.unknown_fields)
    }
}

impl Display for DatabaseDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = TextWriter::new(f);
        w.string("name", &self.name)?;
        w.scalar("id", self.id)?;
        w.message("privileges", &self.privileges)?;
        w.unknown(&self.unknown_fields)
    }
}
