// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for domain objects with sensible test defaults.

use chrono::{DateTime, Utc};
use mynah_core::{
    ContentKind, ConversationId, ConversationKind, InboundMessage, MessageId, RuleId, SenderKind,
};
use mynah_rules::{ConditionSet, NewRule, ResponseRule, RuleAction};

fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// A direct-conversation text message from a human sender.
pub fn text_message(id: &str, conversation_id: &str, content: &str) -> InboundMessage {
    InboundMessage {
        id: MessageId(id.to_string()),
        conversation_id: ConversationId(conversation_id.to_string()),
        conversation_kind: ConversationKind::Direct,
        content_kind: ContentKind::Text,
        content: content.to_string(),
        sender_id: "user-1".to_string(),
        sender_kind: SenderKind::Human,
        created_at: base_time(),
    }
}

/// A keyword-triggered text-reply rule.
pub fn keyword_reply_rule(id: &str, priority: i32, keywords: &[&str], reply: &str) -> ResponseRule {
    ResponseRule {
        id: RuleId(id.to_string()),
        name: id.to_string(),
        description: String::new(),
        active: true,
        priority,
        created_at: base_time(),
        conditions: ConditionSet {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            ..ConditionSet::default()
        },
        action: RuleAction::Text {
            content: reply.to_string(),
        },
        delay_ms: 0,
        escalate_to_human: false,
    }
}

/// A `NewRule` payload for store-driven tests.
pub fn new_keyword_reply(name: &str, priority: i32, keywords: &[&str], reply: &str) -> NewRule {
    NewRule {
        name: name.to_string(),
        description: String::new(),
        active: true,
        priority,
        conditions: ConditionSet {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            ..ConditionSet::default()
        },
        action: RuleAction::Text {
            content: reply.to_string(),
        },
        delay_ms: 0,
        escalate_to_human: false,
    }
}
