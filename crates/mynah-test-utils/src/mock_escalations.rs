// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock escalation sink capturing human hand-off flags.

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use mynah_core::{ConversationId, EscalationSink, MessageId, MynahError};

/// Records `flag_for_handoff` calls for assertion in tests.
#[derive(Default)]
pub struct MockEscalationSink {
    flagged: Mutex<Vec<(ConversationId, MessageId)>>,
    fail: Mutex<bool>,
    notify: Notify,
}

impl MockEscalationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent escalation calls fail.
    pub async fn set_fail(&self, fail: bool) {
        *self.fail.lock().await = fail;
    }

    /// All conversations flagged so far.
    pub async fn flagged(&self) -> Vec<(ConversationId, MessageId)> {
        self.flagged.lock().await.clone()
    }

    /// Waits until at least `count` hand-off flags have been recorded.
    pub async fn wait_for_flags(&self, count: usize) -> Vec<(ConversationId, MessageId)> {
        loop {
            let notified = self.notify.notified();
            {
                let flagged = self.flagged.lock().await;
                if flagged.len() >= count {
                    return flagged.clone();
                }
            }
            notified.await;
        }
    }
}

#[async_trait]
impl EscalationSink for MockEscalationSink {
    async fn flag_for_handoff(
        &self,
        conversation_id: &ConversationId,
        message_id: &MessageId,
    ) -> Result<(), MynahError> {
        if *self.fail.lock().await {
            return Err(MynahError::Internal("mock escalation failure".into()));
        }
        self.flagged
            .lock()
            .await
            .push((conversation_id.clone(), message_id.clone()));
        self.notify.notify_waiters();
        Ok(())
    }
}
