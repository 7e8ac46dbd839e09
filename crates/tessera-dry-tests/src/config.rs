// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without browser storage.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tessera_app_core::config::{ConfigError, ConfigStore};

/// In-memory implementation of [`ConfigStore`] for testing.
///
/// Clones share the same storage, so a test can hand one clone to a
/// `ConfigService` and inspect the other. Call counts include failed calls.
///
/// # Example
///
/// ```
/// use tessera_dry_tests::InMemoryConfigStore;
/// use tessera_app_core::config::ConfigService;
///
/// let store = InMemoryConfigStore::new();
/// let service = ConfigService::new(store.clone());
///
/// service.save("prefs", &serde_json::json!({"log_level": "debug"})).unwrap();
/// assert_eq!(store.load_count(), 0);
/// assert_eq!(store.save_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    data: HashMap<String, Vec<u8>>,
    load_count: usize,
    save_count: usize,
    fail_on_load: bool,
    fail_on_save: bool,
}

impl InMemoryConfigStore {
    /// Create a new empty in-memory config store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `load_raw` fail with a storage error.
    pub fn set_fail_on_load(&self, fail: bool) {
        self.inner.borrow_mut().fail_on_load = fail;
    }

    /// Make every `save_raw` fail with a storage error.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.inner.borrow_mut().fail_on_save = fail;
    }

    /// Number of `load_raw` attempts.
    pub fn load_count(&self) -> usize {
        self.inner.borrow().load_count
    }

    /// Number of `save_raw` attempts.
    pub fn save_count(&self) -> usize {
        self.inner.borrow().save_count
    }

    /// Raw blob stored under `key`, if any.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.borrow().data.get(key).cloned()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut inner = self.inner.borrow_mut();
        inner.load_count += 1;
        if inner.fail_on_load {
            return Err(ConfigError::Storage("simulated load failure".into()));
        }
        inner.data.get(key).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut inner = self.inner.borrow_mut();
        inner.save_count += 1;
        if inner.fail_on_save {
            return Err(ConfigError::Storage("simulated save failure".into()));
        }
        inner.data.insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let store = InMemoryConfigStore::new();
        store.clone().save_raw("k", b"v").unwrap();
        assert_eq!(store.load_raw("k").unwrap(), b"v");
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn missing_key_is_not_found() {
        let store = InMemoryConfigStore::new();
        assert!(matches!(store.load_raw("nope"), Err(ConfigError::NotFound)));
    }

    #[test]
    fn failures_are_storage_errors() {
        let store = InMemoryConfigStore::new();
        store.set_fail_on_save(true);
        assert!(matches!(store.save_raw("k", b"v"), Err(ConfigError::Storage(_))));
        assert_eq!(store.raw("k"), None);
    }
}
