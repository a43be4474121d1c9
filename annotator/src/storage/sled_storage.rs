//! Storage backed by an embedded `sled` database.

use std::path::Path;

use sled::{Db, Tree};

use super::KeyValueStorage;
use crate::error::StorageError;

const TREE_NAME: &str = "annotations";

/// Persistent storage in a `sled` tree.
///
/// Every write is flushed before the call returns.
#[derive(Clone)]
pub struct SledStorage {
    tree: Tree,
    /// Keeps the database open for as long as the tree is used.
    #[allow(dead_code)]
    db: Db,
}

impl SledStorage {
    /// Opens (or creates) the database in the given folder.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db = sled::open(path.as_ref())?;
        Self::from_db(db)
    }

    /// Opens a database that is deleted when dropped.
    pub fn temporary() -> Result<Self, StorageError> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> Result<Self, StorageError> {
        let tree = db.open_tree(TREE_NAME)?;
        Ok(Self { tree, db })
    }
}

impl KeyValueStorage for SledStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let Some(value) = self.tree.get(key)? else {
            return Ok(None);
        };

        String::from_utf8(value.to_vec())
            .map(Some)
            .map_err(|err| StorageError::Backend(format!("value for '{key}' is not UTF-8: {err}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.tree.insert(key, value.as_bytes())?;
        self.tree.flush()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.tree.remove(key)?;
        self.tree.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let storage = SledStorage::temporary().unwrap();

        assert_eq!(storage.get("points").unwrap(), None);
        storage.set("points", "[]").unwrap();
        assert_eq!(storage.get("points").unwrap().as_deref(), Some("[]"));

        storage.remove("points").unwrap();
        assert_eq!(storage.get("points").unwrap(), None);
    }

    #[test]
    fn clones_see_writes() {
        let storage = SledStorage::temporary().unwrap();
        let other = storage.clone();

        storage.set("lines", "[1]").unwrap();
        assert_eq!(other.get("lines").unwrap().as_deref(), Some("[1]"));
    }
}
