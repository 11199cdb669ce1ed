// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound messaging API trait.

use async_trait::async_trait;

use crate::error::MynahError;
use crate::types::{ActionKind, ConversationId, Credentials, MessageId};

/// The credential-gated outbound messaging API.
///
/// `authenticate` exchanges application credentials for a bearer token with
/// a reported TTL; `send` delivers one message. Deduplication of retried
/// attempts is the receiving API's concern, keyed on the idempotency token.
#[async_trait]
pub trait MessagingApi: Send + Sync {
    /// Exchanges the application identifier and secret for a bearer token.
    async fn authenticate(
        &self,
        app_id: &str,
        app_secret: &str,
    ) -> Result<Credentials, MynahError>;

    /// Sends one message into a conversation, returning the created message id.
    ///
    /// Errors with [`MynahError::Dispatch`] on any non-success status.
    async fn send(
        &self,
        token: &str,
        conversation_id: &ConversationId,
        kind: ActionKind,
        payload: &serde_json::Value,
        idempotency_token: &str,
    ) -> Result<MessageId, MynahError>;
}
