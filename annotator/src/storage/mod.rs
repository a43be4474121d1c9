//! Persistent key-value storage of serialized annotation lists.
//!
//! The annotator only needs three operations on string blobs, so every backend is
//! reduced to the [`KeyValueStorage`] trait. Backends do not validate what they
//! store.

mod memory;
pub use memory::MemoryStorage;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        mod local_storage;
        pub use local_storage::LocalStorage;
    } else if #[cfg(feature = "sled")] {
        mod sled_storage;
        pub use sled_storage::SledStorage;
    }
}

use crate::error::StorageError;

/// String-keyed blob storage.
///
/// Writes are synchronous: once `set` or `remove` returns, a new storage handle
/// opened over the same backend observes the change.
pub trait KeyValueStorage {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
