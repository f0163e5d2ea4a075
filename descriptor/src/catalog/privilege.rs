use crate::encoding::unknown::UnknownFields;
use serde::{Deserialize, Serialize};

/// Users allowed to read and write an object. Order carries no meaning and
/// repeated grants are kept as given.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivilegeDescriptor {
    pub read: Vec<String>,
    pub write: Vec<String>,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl PrivilegeDescriptor {
    pub const EMPTY: PrivilegeDescriptor = PrivilegeDescriptor {
        read: Vec::new(),
        write: Vec::new(),
        unknown_fields: UnknownFields::new(),
    };

    /// A shared zero-valued descriptor, for reading through lookups that
    /// found nothing.
    pub fn empty() -> &'static Self {
        static EMPTY: PrivilegeDescriptor = PrivilegeDescriptor::EMPTY;
        &EMPTY
    }

    pub fn new() -> Self {
        Self::default()
    }

    /// Read and write for every user in `users`.
    pub fn with_users<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let read: Vec<String> = users.into_iter().map(Into::into).collect();
        Self {
            write: read.clone(),
            read,
            unknown_fields: UnknownFields::new(),
        }
    }

    pub fn read(&self) -> &[String] {
        &self.read
    }

    pub fn write(&self) -> &[String] {
        &self.write
    }

    pub fn grant_read(&mut self, user: impl Into<String>) {
        self.read.push(user.into())
    }

    pub fn grant_write(&mut self, user: impl Into<String>) {
        self.write.push(user.into())
    }

    pub fn can_read(&self, user: &str) -> bool {
        self.read.iter().any(|u| u == user)
    }

    pub fn can_write(&self, user: &str) -> bool {
        self.write.iter().any(|u| u == user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants() {
        let mut privileges = PrivilegeDescriptor::with_users(["root"]);
        privileges.grant_read("reporter");
        privileges.grant_read("reporter");
        assert_eq!(privileges.read(), ["root", "reporter", "reporter"]);
        assert_eq!(privileges.write(), ["root"]);
        assert!(privileges.can_read("reporter"));
        assert!(!privileges.can_write("reporter"));
        assert!(!PrivilegeDescriptor::EMPTY.can_read("root"));
    }
}
