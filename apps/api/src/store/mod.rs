//! Persistence for the CV record.
//!
//! `KeyValueStore` is the raw string store (the server-side stand-in for the
//! browser's local storage). `CvRepository` keeps the whole record as one JSON
//! blob under a fixed key, overwritten on every save. There is no schema
//! version: a stored blob that no longer parses is logged and treated as absent.

pub mod file;
pub mod memory;
pub mod redis;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, StoreBackend};
use crate::models::cv::CvRecord;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

/// Key the record lives under.
pub const STORAGE_KEY: &str = "cvData";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value storage. Implement this to add a backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Builds the backend selected by configuration.
pub fn open_store(config: &Config) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match &config.store {
        StoreBackend::File { data_dir } => Arc::new(FileStore::new(data_dir.clone())),
        StoreBackend::Redis { url } => Arc::new(RedisStore::open(url)?),
        StoreBackend::Memory => Arc::new(MemoryStore::default()),
    };
    Ok(store)
}

// ────────────────────────────────────────────────────────────────────────────
// Repository
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct CvRepository {
    store: Arc<dyn KeyValueStore>,
}

impl CvRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns the stored record, or `None` if nothing usable is stored.
    /// Read and parse failures are logged here and never reach the caller.
    pub async fn load(&self) -> Option<CvRecord> {
        let raw = match self.store.get(STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored CV under '{STORAGE_KEY}'");
                return None;
            }
            Err(e) => {
                warn!("Failed to read stored CV: {e}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(cv) => Some(cv),
            Err(e) => {
                warn!("Stored CV is malformed, falling back to defaults: {e}");
                None
            }
        }
    }

    /// Overwrites the stored record.
    pub async fn save(&self, cv: &CvRecord) -> Result<(), StoreError> {
        let raw = serde_json::to_string(cv)?;
        self.store.set(STORAGE_KEY, &raw).await
    }
}
