// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory record store for deterministic testing.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mynah_core::{MynahError, RecordStore};

/// A `RecordStore` backed by a `HashMap`, suitable for tests.
#[derive(Default)]
pub struct MemoryRecordStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, MynahError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), MynahError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), MynahError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
