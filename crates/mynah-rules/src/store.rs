// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule CRUD over an injected record store.
//!
//! One whole record per rule under `rules/{id}`, plus an ordered id index
//! under `rules/index`. Records are always written whole — never patched
//! field-by-field in the backing store — so an in-flight reader sees a
//! consistent, fully-formed rule. An in-memory mirror serves reads.

use std::sync::Arc;

use chrono::Utc;
use mynah_core::{MynahError, RecordStore, RuleId};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::rule::{NewRule, ResponseRule, RulePatch};

const RULE_INDEX_KEY: &str = "rules/index";

fn rule_key(id: &RuleId) -> String {
    format!("rules/{}", id.0)
}

/// Holds the ordered collection of response rules for one engine instance.
///
/// Identifiers are generated here (uuid v4) and are unique for the lifetime
/// of the underlying storage; `created_at` is stamped here too, giving the
/// matcher its tie-break order.
pub struct RuleStore {
    records: Arc<dyn RecordStore>,
    rules: RwLock<Vec<ResponseRule>>,
}

impl RuleStore {
    /// Opens the store, loading persisted rules in creation order.
    ///
    /// An index entry whose record is missing or undecodable is skipped with
    /// a warning rather than failing the whole load.
    pub async fn open(records: Arc<dyn RecordStore>) -> Result<Self, MynahError> {
        let ids: Vec<String> = match records.get(RULE_INDEX_KEY).await? {
            Some(bytes) => serde_json::from_slice(&bytes).map_err(decode_err)?,
            None => Vec::new(),
        };

        let mut rules = Vec::with_capacity(ids.len());
        for id in ids {
            match records.get(&format!("rules/{id}")).await? {
                Some(bytes) => match serde_json::from_slice::<ResponseRule>(&bytes) {
                    Ok(rule) => rules.push(rule),
                    Err(e) => {
                        warn!(rule_id = %id, error = %e, "skipping undecodable rule record")
                    }
                },
                None => warn!(rule_id = %id, "indexed rule has no record; skipping"),
            }
        }

        debug!(count = rules.len(), "rule store loaded");
        Ok(Self {
            records,
            rules: RwLock::new(rules),
        })
    }

    /// Returns a defensive snapshot of all rules in creation order.
    ///
    /// Mutating the returned rules does not affect stored state.
    pub async fn list(&self) -> Vec<ResponseRule> {
        self.rules.read().await.clone()
    }

    /// Creates a rule, assigning its id and creation timestamp.
    pub async fn create(&self, new: NewRule) -> Result<ResponseRule, MynahError> {
        let rule = ResponseRule {
            id: RuleId(Uuid::new_v4().to_string()),
            name: new.name,
            description: new.description,
            active: new.active,
            priority: new.priority,
            created_at: Utc::now(),
            conditions: new.conditions,
            action: new.action,
            delay_ms: new.delay_ms,
            escalate_to_human: new.escalate_to_human,
        };

        let mut rules = self.rules.write().await;
        self.persist_rule(&rule).await?;
        rules.push(rule.clone());
        self.persist_index(&rules).await?;
        debug!(rule_id = %rule.id.0, name = %rule.name, "rule created");
        Ok(rule)
    }

    /// Applies a partial update, replacing the stored record whole.
    ///
    /// Fails with [`MynahError::NotFound`] if the id is absent.
    pub async fn update(&self, id: &RuleId, patch: RulePatch) -> Result<ResponseRule, MynahError> {
        let mut rules = self.rules.write().await;
        let slot = rules
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| MynahError::NotFound { id: id.0.clone() })?;

        let mut updated = slot.clone();
        if let Some(name) = patch.name {
            updated.name = name;
        }
        if let Some(description) = patch.description {
            updated.description = description;
        }
        if let Some(active) = patch.active {
            updated.active = active;
        }
        if let Some(priority) = patch.priority {
            updated.priority = priority;
        }
        if let Some(conditions) = patch.conditions {
            updated.conditions = conditions;
        }
        if let Some(action) = patch.action {
            updated.action = action;
        }
        if let Some(delay_ms) = patch.delay_ms {
            updated.delay_ms = delay_ms;
        }
        if let Some(escalate) = patch.escalate_to_human {
            updated.escalate_to_human = escalate;
        }

        self.persist_rule(&updated).await?;
        *slot = updated.clone();
        debug!(rule_id = %id.0, "rule updated");
        Ok(updated)
    }

    /// Deletes a rule. Fails with [`MynahError::NotFound`] if the id is absent.
    pub async fn delete(&self, id: &RuleId) -> Result<(), MynahError> {
        let mut rules = self.rules.write().await;
        let pos = rules
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| MynahError::NotFound { id: id.0.clone() })?;

        self.records.delete(&rule_key(id)).await?;
        rules.remove(pos);
        self.persist_index(&rules).await?;
        debug!(rule_id = %id.0, "rule deleted");
        Ok(())
    }

    async fn persist_rule(&self, rule: &ResponseRule) -> Result<(), MynahError> {
        let bytes = serde_json::to_vec(rule).map_err(decode_err)?;
        self.records.put(&rule_key(&rule.id), &bytes).await
    }

    async fn persist_index(&self, rules: &[ResponseRule]) -> Result<(), MynahError> {
        let ids: Vec<&str> = rules.iter().map(|r| r.id.0.as_str()).collect();
        let bytes = serde_json::to_vec(&ids).map_err(decode_err)?;
        self.records.put(RULE_INDEX_KEY, &bytes).await
    }
}

fn decode_err(e: serde_json::Error) -> MynahError {
    MynahError::Storage {
        source: Box::new(e),
    }
}
