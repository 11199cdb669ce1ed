// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock outbound messaging API for deterministic testing.
//!
//! `MockMessagingApi` implements `MessagingApi` with captured sends, an
//! authentication-call counter, and configurable latency and failure so
//! tests can exercise the credential cache and the executor without a
//! network.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use mynah_core::{
    ActionKind, ConversationId, Credentials, MessageId, MessagingApi, MynahError,
};

/// One captured `send` call.
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub token: String,
    pub conversation_id: ConversationId,
    pub kind: ActionKind,
    pub payload: serde_json::Value,
    pub idempotency_token: String,
}

/// A mock messaging API for testing.
pub struct MockMessagingApi {
    auth_calls: Mutex<u32>,
    ttl_seconds: u64,
    auth_latency: Duration,
    fail_auth: Mutex<bool>,
    fail_sends: Mutex<bool>,
    sent: Mutex<Vec<SentMessage>>,
    notify: Notify,
}

impl MockMessagingApi {
    pub fn new() -> Self {
        Self {
            auth_calls: Mutex::new(0),
            ttl_seconds: 7200,
            auth_latency: Duration::ZERO,
            fail_auth: Mutex::new(false),
            fail_sends: Mutex::new(false),
            sent: Mutex::new(Vec::new()),
            notify: Notify::new(),
        }
    }

    /// Reported credential TTL for successful authentications.
    pub fn with_ttl_seconds(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// Simulated latency of the authentication endpoint.
    pub fn with_auth_latency(mut self, latency: Duration) -> Self {
        self.auth_latency = latency;
        self
    }

    /// Make subsequent authentication calls fail.
    pub async fn set_fail_auth(&self, fail: bool) {
        *self.fail_auth.lock().await = fail;
    }

    /// Make subsequent send calls fail.
    pub async fn set_fail_sends(&self, fail: bool) {
        *self.fail_sends.lock().await = fail;
    }

    /// Number of authentication calls issued so far.
    pub async fn auth_call_count(&self) -> u32 {
        *self.auth_calls.lock().await
    }

    /// All captured sends, including attempts that were failed.
    pub async fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent.lock().await.clone()
    }

    /// Waits until at least `count` send attempts have been captured.
    pub async fn wait_for_sends(&self, count: usize) -> Vec<SentMessage> {
        loop {
            let notified = self.notify.notified();
            {
                let sent = self.sent.lock().await;
                if sent.len() >= count {
                    return sent.clone();
                }
            }
            notified.await;
        }
    }
}

impl Default for MockMessagingApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagingApi for MockMessagingApi {
    async fn authenticate(
        &self,
        _app_id: &str,
        _app_secret: &str,
    ) -> Result<Credentials, MynahError> {
        if !self.auth_latency.is_zero() {
            tokio::time::sleep(self.auth_latency).await;
        }

        let mut calls = self.auth_calls.lock().await;
        *calls += 1;

        if *self.fail_auth.lock().await {
            return Err(MynahError::Credential {
                message: "mock authentication failure".into(),
                source: None,
            });
        }

        Ok(Credentials {
            token: format!("token-{}", *calls),
            ttl_seconds: self.ttl_seconds,
        })
    }

    async fn send(
        &self,
        token: &str,
        conversation_id: &ConversationId,
        kind: ActionKind,
        payload: &serde_json::Value,
        idempotency_token: &str,
    ) -> Result<MessageId, MynahError> {
        let record = SentMessage {
            token: token.to_string(),
            conversation_id: conversation_id.clone(),
            kind,
            payload: payload.clone(),
            idempotency_token: idempotency_token.to_string(),
        };
        self.sent.lock().await.push(record);
        self.notify.notify_waiters();

        if *self.fail_sends.lock().await {
            return Err(MynahError::Dispatch {
                message: "mock send failure".into(),
                source: None,
            });
        }

        Ok(MessageId(uuid::Uuid::new_v4().to_string()))
    }
}
