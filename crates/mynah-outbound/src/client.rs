// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the outbound messaging API.
//!
//! Implements [`MessagingApi`] over reqwest: `POST {base}/auth` exchanges
//! application credentials for a bearer token, `POST {base}/messages`
//! delivers one message. No automatic retry — a failed credential call is
//! the caller's decision to repeat, and a failed dispatch is reported, not
//! retried.

use std::time::Duration;

use async_trait::async_trait;
use mynah_config::OutboundConfig;
use mynah_core::{ActionKind, ConversationId, Credentials, MessageId, MessagingApi, MynahError};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, AuthRequest, AuthResponse, SendRequest, SendResponse};

/// HTTP client for the outbound messaging API.
#[derive(Debug, Clone)]
pub struct OutboundClient {
    client: reqwest::Client,
    base_url: String,
}

impl OutboundClient {
    /// Creates a client against the configured base URL.
    pub fn new(config: &OutboundConfig) -> Result<Self, MynahError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| MynahError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Decode an API error body into a readable message, falling back to the
    /// raw body when it is not the documented error shape.
    fn describe_error(status: reqwest::StatusCode, body: &str) -> String {
        if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(body) {
            format!(
                "API error ({}): {}",
                api_err.error.type_, api_err.error.message
            )
        } else {
            format!("API returned {status}: {body}")
        }
    }
}

#[async_trait]
impl MessagingApi for OutboundClient {
    async fn authenticate(
        &self,
        app_id: &str,
        app_secret: &str,
    ) -> Result<Credentials, MynahError> {
        let url = format!("{}/auth", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&AuthRequest { app_id, app_secret })
            .send()
            .await
            .map_err(|e| MynahError::Credential {
                message: format!("authentication request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "authentication response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MynahError::Credential {
                message: Self::describe_error(status, &body),
                source: None,
            });
        }

        let auth: AuthResponse =
            response.json().await.map_err(|e| MynahError::Credential {
                message: format!("malformed authentication response: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Credentials {
            token: auth.access_token,
            ttl_seconds: auth.expires_in,
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
        let url = format!("{}/messages", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&SendRequest {
                conversation_id: &conversation_id.0,
                kind,
                payload,
                idempotency_token,
            })
            .send()
            .await
            .map_err(|e| MynahError::Dispatch {
                message: format!("send request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, conversation_id = %conversation_id.0, "send response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MynahError::Dispatch {
                message: Self::describe_error(status, &body),
                source: None,
            });
        }

        let sent: SendResponse = response.json().await.map_err(|e| MynahError::Dispatch {
            message: format!("malformed send response: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(MessageId(sent.message_id))
    }
}
