// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator-authored response rules.
//!
//! A rule is a condition set plus an action. Clauses within the condition
//! set AND together; values within a clause OR together; an unset clause is
//! no constraint.

use chrono::{DateTime, NaiveTime, Utc};
use mynah_core::{ActionKind, ContentKind, ConversationKind, MynahError, RuleId, SenderKind};
use serde::{Deserialize, Serialize};

/// An operator-authored response rule.
///
/// `id` and `created_at` are assigned by the rule store. Lower `priority`
/// wins; ties break by creation order, earliest first. Rules never expire
/// implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRule {
    pub id: RuleId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub active: bool,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub conditions: ConditionSet,
    pub action: RuleAction,
    /// Milliseconds to wait before sending.
    #[serde(default)]
    pub delay_ms: u64,
    /// Flag the conversation for human hand-off after (or instead of) sending.
    #[serde(default)]
    pub escalate_to_human: bool,
}

/// Condition clauses for a rule. Empty lists constrain nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionSet {
    /// Match if the message text contains any keyword (case-insensitive
    /// substring).
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub content_kinds: Vec<ContentKind>,
    #[serde(default)]
    pub conversation_kinds: Vec<ConversationKind>,
    #[serde(default)]
    pub sender_kinds: Vec<SenderKind>,
    /// Local wall-clock window the rule applies in.
    #[serde(default)]
    pub time_window: Option<TimeWindow>,
}

/// A local wall-clock time window with `HH:MM` bounds.
///
/// A window whose `start` is after its `end` wraps midnight and spans into
/// the next day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

impl TimeWindow {
    /// Whether `now` falls within the window (bounds inclusive).
    pub fn contains(&self, now: NaiveTime) -> Result<bool, MynahError> {
        let start = parse_hhmm(&self.start)?;
        let end = parse_hhmm(&self.end)?;
        if start <= end {
            Ok(now >= start && now <= end)
        } else {
            Ok(now >= start || now <= end)
        }
    }
}

fn parse_hhmm(value: &str) -> Result<NaiveTime, MynahError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|e| MynahError::Config(format!("invalid time window bound `{value}`: {e}")))
}

/// The response a rule produces when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RuleAction {
    /// A literal text reply.
    Text { content: String },
    /// A structured card payload, forwarded as-is.
    Card { payload: serde_json::Value },
    /// A named template resolved by the template renderer.
    Template {
        name: String,
        #[serde(default)]
        params: serde_json::Value,
    },
}

impl RuleAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            RuleAction::Text { .. } => ActionKind::Text,
            RuleAction::Card { .. } => ActionKind::Card,
            RuleAction::Template { .. } => ActionKind::Template,
        }
    }

    /// An empty action skips the send; escalation, if flagged, still happens.
    pub fn is_empty(&self) -> bool {
        match self {
            RuleAction::Text { content } => content.trim().is_empty(),
            RuleAction::Card { payload } => payload.is_null(),
            RuleAction::Template { name, .. } => name.trim().is_empty(),
        }
    }
}

/// Payload for creating a rule; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRule {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub conditions: ConditionSet,
    pub action: RuleAction,
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(default)]
    pub escalate_to_human: bool,
}

fn default_active() -> bool {
    true
}

/// Partial update for an existing rule; unset fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub priority: Option<i32>,
    pub conditions: Option<ConditionSet>,
    pub action: Option<RuleAction>,
    pub delay_ms: Option<u64>,
    pub escalate_to_human: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn plain_window_contains_interior_times() {
        let window = TimeWindow {
            start: "09:00".into(),
            end: "17:00".into(),
        };
        assert!(window.contains(at(12, 0)).unwrap());
        assert!(window.contains(at(9, 0)).unwrap());
        assert!(!window.contains(at(8, 59)).unwrap());
        assert!(!window.contains(at(20, 0)).unwrap());
    }

    #[test]
    fn midnight_spanning_window_wraps_to_next_day() {
        let window = TimeWindow {
            start: "22:00".into(),
            end: "02:00".into(),
        };
        assert!(window.contains(at(23, 30)).unwrap());
        assert!(window.contains(at(1, 0)).unwrap());
        assert!(!window.contains(at(12, 0)).unwrap());
    }

    #[test]
    fn malformed_bound_is_an_error() {
        let window = TimeWindow {
            start: "25:99".into(),
            end: "02:00".into(),
        };
        assert!(window.contains(at(1, 0)).is_err());
    }

    #[test]
    fn action_round_trips_through_tagged_json() {
        let action = RuleAction::Template {
            name: "welcome".into(),
            params: serde_json::json!({"user": "alice"}),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["kind"], "template");
        let back: RuleAction = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn empty_actions_are_detected() {
        assert!(RuleAction::Text { content: "  ".into() }.is_empty());
        assert!(RuleAction::Card {
            payload: serde_json::Value::Null
        }
        .is_empty());
        assert!(!RuleAction::Text {
            content: "hi".into()
        }
        .is_empty());
    }

    #[test]
    fn new_rule_defaults_to_active() {
        let new: NewRule = serde_json::from_value(serde_json::json!({
            "name": "greet",
            "action": {"kind": "text", "content": "hello"},
        }))
        .unwrap();
        assert!(new.active);
        assert_eq!(new.priority, 0);
        assert_eq!(new.delay_ms, 0);
        assert!(!new.escalate_to_human);
    }
}
