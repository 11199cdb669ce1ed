// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Mynah workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Event type routed into the engine; all other event types are ignored.
pub const MESSAGE_RECEIVED_EVENT: &str = "message-received";

/// Unique identifier for a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Unique identifier for a direct or group conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

/// Unique identifier for a response rule, generated by the rule store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleId(pub String);

/// Kind of conversation a message belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ConversationKind {
    Direct,
    Group,
}

/// Kind of content a message carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    Text,
    Image,
    File,
    Audio,
    Video,
    Interactive,
}

/// Kind of sender that produced a message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SenderKind {
    Human,
    AutomatedAgent,
    System,
}

/// Kind of action an outbound send carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Text,
    Card,
    Template,
}

/// An inbound message as delivered by the transport.
///
/// Created once from the event payload and read-only thereafter; the engine
/// never mutates it. For `text` content the `content` field is the message
/// text itself; other kinds carry their serialized payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub conversation_kind: ConversationKind,
    pub content_kind: ContentKind,
    pub content: String,
    pub sender_id: String,
    pub sender_kind: SenderKind,
    pub created_at: DateTime<Utc>,
}

/// A bearer credential as reported by the outbound messaging API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub ttl_seconds: u64,
}

/// An inbound event envelope as delivered by the transport.
///
/// The `verification_token` is checked by the event verifier before the
/// payload is trusted; payload decryption, if configured, happens upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct EventEnvelope {
    pub verification_token: String,
    pub event_type: String,
    pub payload: serde_json::Value,
}
