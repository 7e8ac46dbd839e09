// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `window.localStorage` as a config store.

use tessera_app_core::config::{ConfigError, ConfigStore};
use web_sys::Storage;

use crate::js_reason;

/// [`ConfigStore`] keeping UTF-8 blobs in `localStorage`.
pub struct LocalStorageConfigStore {
    storage: Storage,
}

impl LocalStorageConfigStore {
    /// Store over the current window's `localStorage`.
    ///
    /// Fails outside a window context or when storage is disabled (private
    /// browsing modes, sandboxed frames).
    pub fn new() -> Result<Self, ConfigError> {
        let window = web_sys::window()
            .ok_or_else(|| ConfigError::Storage("no window in this context".to_owned()))?;
        let storage = window
            .local_storage()
            .map_err(|err| ConfigError::Storage(js_reason(&err)))?
            .ok_or_else(|| ConfigError::Storage("localStorage is unavailable".to_owned()))?;
        Ok(Self { storage })
    }
}

impl ConfigStore for LocalStorageConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        match self.storage.get_item(key) {
            Ok(Some(text)) => Ok(text.into_bytes()),
            Ok(None) => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Storage(js_reason(&err))),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let text = std::str::from_utf8(data).map_err(|err| ConfigError::Other(err.to_string()))?;
        self.storage
            .set_item(key, text)
            .map_err(|err| ConfigError::Storage(js_reason(&err)))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn round_trips_and_reports_missing_keys() {
        let store = LocalStorageConfigStore::new().unwrap();
        let key = "tessera.test.storage";
        store.storage.remove_item(key).unwrap();
        assert!(matches!(store.load_raw(key), Err(ConfigError::NotFound)));

        store.save_raw(key, br#"{"log_level":"debug"}"#).unwrap();
        assert_eq!(store.load_raw(key).unwrap(), br#"{"log_level":"debug"}"#.to_vec());
        store.storage.remove_item(key).unwrap();
    }
}
