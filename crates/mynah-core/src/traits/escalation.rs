// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Escalation sink trait for human hand-off.

use async_trait::async_trait;

use crate::error::MynahError;
use crate::types::{ConversationId, MessageId};

/// Flags a conversation for human-agent hand-off.
///
/// How the flag is represented (a CRM queue, a record-store entry, a
/// notification) is the surrounding system's concern.
#[async_trait]
pub trait EscalationSink: Send + Sync {
    async fn flag_for_handoff(
        &self,
        conversation_id: &ConversationId,
        message_id: &MessageId,
    ) -> Result<(), MynahError>;
}
