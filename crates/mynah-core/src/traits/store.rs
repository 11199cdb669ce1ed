// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyed record store trait backing the rule store.

use async_trait::async_trait;

use crate::error::MynahError;

/// A reliable keyed byte store provided by the surrounding system.
///
/// The rule store writes whole records only — it never patches fields in
/// place — so any implementation that replaces values atomically per key
/// gives in-flight readers a consistent, fully-formed rule.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, MynahError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), MynahError>;

    /// Removes the value stored under `key`. Removing an absent key is not
    /// an error.
    async fn delete(&self, key: &str) -> Result<(), MynahError>;
}
