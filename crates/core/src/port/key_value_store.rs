// Key-Value Store Port (Interface)

use crate::error::Result;
use async_trait::async_trait;

/// Persistent string-to-string storage owned by the host
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if nothing was stored
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key` (no-op if absent)
    async fn remove(&self, key: &str) -> Result<()>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// In-memory store with optional write failures
    #[derive(Default)]
    pub struct InMemoryKeyValueStore {
        entries: Arc<Mutex<HashMap<String, String>>>,
        fail_writes: Arc<Mutex<bool>>,
    }

    impl InMemoryKeyValueStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent `set`/`remove` fail
        pub fn set_fail_writes(&self, fail: bool) {
            *self.fail_writes.lock().unwrap() = fail;
        }

        /// Store a raw value bypassing any serialization
        pub fn insert_raw(&self, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }

        pub fn raw(&self, key: &str) -> Option<String> {
            self.entries.lock().unwrap().get(key).cloned()
        }
    }

    #[async_trait]
    impl KeyValueStore for InMemoryKeyValueStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            if *self.fail_writes.lock().unwrap() {
                return Err(AppError::Storage("mock write failure".to_string()));
            }
            self.insert_raw(key, value);
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<()> {
            if *self.fail_writes.lock().unwrap() {
                return Err(AppError::Storage("mock write failure".to_string()));
            }
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }
    }
}
