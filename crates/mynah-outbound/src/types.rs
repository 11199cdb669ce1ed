// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response types for the outbound messaging API.

use mynah_core::ActionKind;
use serde::{Deserialize, Serialize};

/// Body of the authentication call.
#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub app_id: &'a str,
    pub app_secret: &'a str,
}

/// Successful authentication response.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub expires_in: u64,
}

/// Body of the send call. The idempotency token lets the receiving API
/// deduplicate retried attempts.
#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
    pub conversation_id: &'a str,
    pub kind: ActionKind,
    pub payload: &'a serde_json::Value,
    pub idempotency_token: &'a str,
}

/// Successful send response.
#[derive(Debug, Deserialize)]
pub struct SendResponse {
    pub message_id: String,
}

/// Error body returned by the API on non-success status.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type")]
    pub type_: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_request_serializes_action_kind_kebab_case() {
        let payload = serde_json::json!("hi");
        let req = SendRequest {
            conversation_id: "conv-1",
            kind: ActionKind::Text,
            payload: &payload,
            idempotency_token: "tok-1",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["kind"], "text");
        assert_eq!(json["conversation_id"], "conv-1");
    }

    #[test]
    fn api_error_body_deserializes() {
        let body = r#"{"error":{"type":"rate_limited","message":"slow down"}}"#;
        let err: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(err.error.type_, "rate_limited");
        assert_eq!(err.error.message, "slow down");
    }
}
