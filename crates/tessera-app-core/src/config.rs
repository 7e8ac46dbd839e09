// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted client settings: a raw blob store and a JSON service on top.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::warn;

/// Where settings blobs live (`localStorage` in the browser, memory in
/// tests). Keys are logical names such as `tessera.client`.
pub trait ConfigStore {
    /// Raw blob stored under `key`; [`ConfigError::NotFound`] when absent.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Replace the blob stored under `key`.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Why a settings read or write failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing stored under the key.
    #[error("not found")]
    NotFound,
    /// The backing store refused the read or write.
    #[error("storage error: {0}")]
    Storage(String),
    /// Stored blob is not valid JSON for the requested type.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Anything else.
    #[error("other: {0}")]
    Other(String),
}

/// JSON (de)serialization over a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S: ConfigStore> ConfigService<S> {
    /// Service over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Decode the value under `key`. Absent or empty blobs are `Ok(None)`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        let bytes = match self.store.load_raw(key) {
            Ok(bytes) => bytes,
            Err(ConfigError::NotFound) => return Ok(None),
            Err(err) => return Err(err),
        };
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Encode `value` (pretty JSON, so it stays hand-editable) under `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }

    /// Settings under `key`, never failing.
    ///
    /// Unreadable values fall back to `T::default()` and are left in place.
    /// Absent values fall back too, and the defaults are written once so the
    /// user has something to edit.
    pub fn load_or_init<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Serialize + Default,
    {
        match self.load::<T>(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                let value = T::default();
                if let Err(err) = self.save(key, &value) {
                    warn!(key, %err, "could not persist default settings");
                }
                value
            }
            Err(err) => {
                warn!(key, %err, "settings unreadable; using defaults");
                T::default()
            }
        }
    }
}
