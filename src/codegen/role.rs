//! Generation targets.

use std::fmt;

use super::Conventions;

/// The kind of generated class a branch is emitted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Role {
    /// Column storage holding the branch for every element of a collection
    #[cfg_attr(feature = "cli", value(name = "storage"))]
    Storage,
    /// Standalone record caching its own values
    #[cfg_attr(feature = "cli", value(name = "cached"))]
    CachedRecord,
    /// Record wrapping one entry of an external store
    #[cfg_attr(feature = "cli", value(name = "entry"))]
    EntryRecord,
    /// View of one element of a collection, aliasing the column storage
    #[cfg_attr(feature = "cli", value(name = "element"))]
    Element,
}

impl Role {
    /// All roles.
    pub const ALL: [Role; 4] = [
        Role::Storage,
        Role::CachedRecord,
        Role::EntryRecord,
        Role::Element,
    ];

    /// Human-readable role name.
    pub fn label(self) -> &'static str {
        match self {
            Role::Storage => "storage",
            Role::CachedRecord => "cached record",
            Role::EntryRecord => "entry record",
            Role::Element => "element",
        }
    }

    /// Variable qualifying persisted branch names in this role.
    ///
    /// Entry records persist under the bare branch name.
    pub fn qualifier(self, conventions: &Conventions) -> Option<&str> {
        match self {
            Role::Storage | Role::Element => Some(conventions.container_name.as_str()),
            Role::CachedRecord => Some(conventions.instance_name.as_str()),
            Role::EntryRecord => None,
        }
    }

    /// Whether this role is a record owning inline values.
    pub fn is_record(self) -> bool {
        matches!(self, Role::CachedRecord | Role::EntryRecord)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Representation of column storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageMode {
    /// Heap array of fixed capacity behind a raw pointer
    #[default]
    RawArray,
    /// Growable `std::vector`
    Vector,
}

impl StorageMode {
    /// Vector storage when `use_vector` is set, raw arrays otherwise.
    pub fn from_vector_flag(use_vector: bool) -> Self {
        if use_vector {
            StorageMode::Vector
        } else {
            StorageMode::RawArray
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifiers() {
        let conventions = Conventions::default();
        assert_eq!(Role::Storage.qualifier(&conventions), Some("_name"));
        assert_eq!(Role::Element.qualifier(&conventions), Some("_name"));
        assert_eq!(Role::CachedRecord.qualifier(&conventions), Some("name_"));
        assert_eq!(Role::EntryRecord.qualifier(&conventions), None);
    }

    #[test]
    fn test_storage_mode_flag() {
        assert_eq!(StorageMode::from_vector_flag(true), StorageMode::Vector);
        assert_eq!(StorageMode::from_vector_flag(false), StorageMode::RawArray);
    }
}
