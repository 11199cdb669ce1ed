// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Mynah automated message-response engine.
//!
//! This crate provides the error type, domain types, and the collaborator
//! traits through which the engine reaches persistence, the outbound
//! messaging API, template rendering, and escalation hand-off.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MynahError;
pub use types::{
    ActionKind, ContentKind, ConversationId, ConversationKind, Credentials, EventEnvelope,
    InboundMessage, MessageId, RuleId, SenderKind, MESSAGE_RECEIVED_EVENT,
};

pub use traits::{EscalationSink, MessagingApi, RecordStore, TemplateRenderer};
