use crate::catalog::error::Error;
use crate::catalog::ColumnId;
use crate::encoding::unknown::UnknownFields;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// SQL type family of a column.
///
/// The numbering is sparse: `6` was never assigned and stays reserved. Any
/// other `i32` is accepted and carried through unchanged, so kinds added by a
/// newer writer survive a round trip.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ColumnKind(i32);

impl ColumnKind {
    pub const BIT: ColumnKind = ColumnKind(0);
    pub const INT: ColumnKind = ColumnKind(1);
    pub const FLOAT: ColumnKind = ColumnKind(2);
    pub const DECIMAL: ColumnKind = ColumnKind(3);
    pub const DATE: ColumnKind = ColumnKind(4);
    pub const TIME: ColumnKind = ColumnKind(5);
    pub const TIMESTAMP: ColumnKind = ColumnKind(7);
    pub const CHAR: ColumnKind = ColumnKind(8);
    pub const TEXT: ColumnKind = ColumnKind(9);
    pub const BLOB: ColumnKind = ColumnKind(10);

    const NAMES: [(ColumnKind, &'static str); 10] = [
        (ColumnKind::BIT, "BIT"),
        (ColumnKind::INT, "INT"),
        (ColumnKind::FLOAT, "FLOAT"),
        (ColumnKind::DECIMAL, "DECIMAL"),
        (ColumnKind::DATE, "DATE"),
        (ColumnKind::TIME, "TIME"),
        (ColumnKind::TIMESTAMP, "TIMESTAMP"),
        (ColumnKind::CHAR, "CHAR"),
        (ColumnKind::TEXT, "TEXT"),
        (ColumnKind::BLOB, "BLOB"),
    ];

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    pub fn name(self) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, name)| *name)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(_, known)| *known == name)
            .map(|(kind, _)| *kind)
    }

    pub fn is_known(self) -> bool {
        self.name().is_some()
    }
}

impl From<i32> for ColumnKind {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<ColumnKind> for i32 {
    fn from(kind: ColumnKind) -> Self {
        kind.0
    }
}

impl Display for ColumnKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Debug for ColumnKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for ColumnKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
            .or_else(|| s.parse::<i32>().ok().map(Self))
            .ok_or_else(|| Error::NotFound("column kind", s.to_string()))
    }
}

impl Serialize for ColumnKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.name() {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_i32(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for ColumnKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KindVisitor;

        impl<'de> Visitor<'de> for KindVisitor {
            type Value = ColumnKind;

            fn expecting(&self, f: &mut Formatter) -> std::fmt::Result {
                f.write_str("a column kind name or an i32")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                ColumnKind::from_name(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                i32::try_from(v)
                    .map(ColumnKind)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i32::try_from(v)
                    .map(ColumnKind)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }
        }

        deserializer.deserialize_any(KindVisitor)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnType {
    pub kind: ColumnKind,
    /// Bit or character width, for BIT, INT, FLOAT, DECIMAL and CHAR.
    pub width: i32,
    /// FLOAT and DECIMAL only.
    pub precision: i32,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl ColumnType {
    pub const EMPTY: ColumnType = ColumnType::new(ColumnKind::BIT);

    /// A shared zero-valued descriptor, for reading through lookups that
    /// found nothing.
    pub fn empty() -> &'static Self {
        static EMPTY: ColumnType = ColumnType::EMPTY;
        &EMPTY
    }

    pub const fn new(kind: ColumnKind) -> Self {
        Self {
            kind,
            width: 0,
            precision: 0,
            unknown_fields: UnknownFields::new(),
        }
    }

    pub fn with_width(mut self, width: i32) -> Self {
        self.width = width;
        self
    }

    pub fn with_precision(mut self, precision: i32) -> Self {
        self.precision = precision;
        self
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn precision(&self) -> i32 {
        self.precision
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnDescriptor {
    pub name: String,
    pub id: ColumnId,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub nullable: bool,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl ColumnDescriptor {
    pub const EMPTY: ColumnDescriptor = ColumnDescriptor {
        name: String::new(),
        id: 0,
        column_type: ColumnType::EMPTY,
        nullable: false,
        unknown_fields: UnknownFields::new(),
    };

    /// A shared zero-valued descriptor, for reading through lookups that
    /// found nothing.
    pub fn empty() -> &'static Self {
        static EMPTY: ColumnDescriptor = ColumnDescriptor::EMPTY;
        &EMPTY
    }

    pub fn new<T: Into<String>>(id: ColumnId, name: T, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            id,
            column_type,
            nullable: false,
            unknown_fields: UnknownFields::new(),
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> ColumnId {
        self.id
    }

    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn set_id(&mut self, id: ColumnId) {
        self.id = id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(ColumnKind::default(), ColumnKind::BIT);
        assert_eq!(ColumnKind::TIMESTAMP.value(), 7);
        assert_eq!(ColumnKind::TIMESTAMP.to_string(), "TIMESTAMP");
        assert_eq!(ColumnKind::from_name("BLOB"), Some(ColumnKind::BLOB));
        assert_eq!(ColumnKind::from_name("blob"), None);
        assert!(!ColumnKind::new(6).is_known());
        assert_eq!(ColumnKind::new(6).to_string(), "6");
        assert_eq!(ColumnKind::new(-3).to_string(), "-3");
        assert_eq!(format!("{:?}", ColumnKind::INT), "INT");
    }

    #[test]
    fn kind_from_str() {
        assert_eq!("DECIMAL".parse::<ColumnKind>(), Ok(ColumnKind::DECIMAL));
        assert_eq!("42".parse::<ColumnKind>(), Ok(ColumnKind::new(42)));
        assert_eq!(
            "VARCHAR".parse::<ColumnKind>(),
            Err(Error::NotFound("column kind", "VARCHAR".to_string()))
        );
    }

    #[test]
    fn kind_json() {
        assert_eq!(serde_json::to_string(&ColumnKind::INT).unwrap(), "\"INT\"");
        assert_eq!(serde_json::to_string(&ColumnKind::new(11)).unwrap(), "11");
        assert_eq!(
            serde_json::from_str::<ColumnKind>("\"TEXT\"").unwrap(),
            ColumnKind::TEXT
        );
        assert_eq!(
            serde_json::from_str::<ColumnKind>("9").unwrap(),
            ColumnKind::TEXT
        );
        assert!(serde_json::from_str::<ColumnKind>("\"NUMBER\"").is_err());
        assert!(serde_json::from_str::<ColumnKind>("4294967296").is_err());
    }

    #[test]
    fn empty_accessors() {
        let missing: Option<&ColumnDescriptor> = None;
        let column = missing.unwrap_or(ColumnDescriptor::empty());
        assert_eq!(column.name(), "");
        assert_eq!(column.id(), 0);
        assert_eq!(column.column_type().kind(), ColumnKind::BIT);
        assert_eq!(column.column_type().width(), 0);
        assert!(!column.nullable());
        assert_eq!(column, &ColumnDescriptor::default());
    }

    #[test]
    fn column_json() {
        let column = ColumnDescriptor::new(
            1,
            "price",
            ColumnType::new(ColumnKind::DECIMAL)
                .with_width(10)
                .with_precision(2),
        )
        .with_nullable(true);
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "price",
                "id": 1,
                "type": {"kind": "DECIMAL", "width": 10, "precision": 2},
                "nullable": true,
            })
        );
        assert_eq!(
            serde_json::from_value::<ColumnDescriptor>(json).unwrap(),
            column
        );
    }
}
