use crate::catalog::error::Error;
use crate::catalog::privilege::PrivilegeDescriptor;
use crate::catalog::DescriptorId;
use crate::encoding::unknown::UnknownFields;
use crate::encoding::Decoder;
use crate::error::DescriptorResult;
use serde::{Deserialize, Serialize};

/// A database namespace. Its id is drawn from the same space as table ids and
/// its privileges apply to every table inside it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseDescriptor {
    pub name: String,
    pub id: DescriptorId,
    pub privileges: PrivilegeDescriptor,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl DatabaseDescriptor {
    pub const EMPTY: DatabaseDescriptor = DatabaseDescriptor {
        name: String::new(),
        id: 0,
        privileges: PrivilegeDescriptor::EMPTY,
        unknown_fields: UnknownFields::new(),
    };

    /// A shared zero-valued descriptor, for reading through lookups that
    /// found nothing.
    pub fn empty() -> &'static Self {
        static EMPTY: DatabaseDescriptor = DatabaseDescriptor::EMPTY;
        &EMPTY
    }

    pub fn new<T: Into<String>>(id: DescriptorId, name: T) -> Self {
        Self {
            name: name.into(),
            id,
            ..Self::default()
        }
    }

    pub fn with_privileges(mut self, privileges: PrivilegeDescriptor) -> Self {
        self.privileges = privileges;
        self
    }

    /// Decodes a stored database and checks it is well formed.
    pub fn unmarshal_validated(data: &[u8]) -> DescriptorResult<Self> {
        let database = Self::unmarshal(data)?;
        database.validate()?;
        Ok(database)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> DescriptorId {
        self.id
    }

    pub fn privileges(&self) -> &PrivilegeDescriptor {
        &self.privileges
    }

    pub fn privileges_mut(&mut self) -> &mut PrivilegeDescriptor {
        &mut self.privileges
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.is_empty() {
            return Err(Error::Invalid("empty database name".to_string()));
        }
        if self.id == 0 {
            return Err(Error::Invalid(format!(
                "invalid database id 0 for {}",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_descriptor() {
        let mut database = DatabaseDescriptor::new(50, "shop")
            .with_privileges(PrivilegeDescriptor::with_users(["root"]));
        database.privileges_mut().grant_read("analyst");
        assert_eq!(database.name(), "shop");
        assert!(database.privileges().can_read("analyst"));
        assert!(!database.privileges().can_write("analyst"));
        assert_eq!(database.validate(), Ok(()));
        assert!(DatabaseDescriptor::new(0, "shop").validate().is_err());
        assert!(DatabaseDescriptor::empty().validate().is_err());
    }

    #[test]
    fn database_json() {
        let database = DatabaseDescriptor::new(50, "shop")
            .with_privileges(PrivilegeDescriptor::with_users(["root"]));
        assert_eq!(
            serde_json::to_string(&database).unwrap(),
            r#"{"name":"shop","id":50,"privileges":{"read":["root"],"write":["root"]}}"#
        );
    }
}
