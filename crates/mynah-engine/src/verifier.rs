// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound envelope authentication.
//!
//! A plain equality check against the configured verification token — no
//! cryptographic signature scheme. Payload decryption, where a deployment
//! configures one, happens upstream of this check. When no token is
//! configured, every envelope is rejected (fail-closed).

use mynah_config::InboundConfig;
use mynah_core::EventEnvelope;
use tracing::error;

/// Authenticates inbound event envelopes before they are trusted.
#[derive(Clone)]
pub struct EventVerifier {
    expected_token: Option<String>,
}

impl std::fmt::Debug for EventVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventVerifier")
            .field(
                "expected_token",
                &self.expected_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

impl EventVerifier {
    pub fn new(expected_token: Option<String>) -> Self {
        Self { expected_token }
    }

    pub fn from_config(config: &InboundConfig) -> Self {
        Self::new(config.verification_token.clone())
    }

    /// Whether the envelope's verification token matches the configured one.
    ///
    /// Envelopes failing this check must be dropped silently by the caller —
    /// logged, never answered.
    pub fn verify(&self, envelope: &EventEnvelope) -> bool {
        match self.expected_token {
            Some(ref expected) if !expected.is_empty() => {
                envelope.verification_token == *expected
            }
            _ => {
                error!("no verification token configured -- rejecting envelope");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(token: &str) -> EventEnvelope {
        EventEnvelope {
            verification_token: token.into(),
            event_type: "message-received".into(),
            payload: serde_json::Value::Null,
        }
    }

    #[test]
    fn accepts_matching_token() {
        let verifier = EventVerifier::new(Some("expected".into()));
        assert!(verifier.verify(&envelope("expected")));
    }

    #[test]
    fn rejects_wrong_token() {
        let verifier = EventVerifier::new(Some("expected".into()));
        assert!(!verifier.verify(&envelope("forged")));
    }

    #[test]
    fn rejects_everything_when_unconfigured() {
        let verifier = EventVerifier::new(None);
        assert!(!verifier.verify(&envelope("anything")));

        let blank = EventVerifier::new(Some(String::new()));
        assert!(!blank.verify(&envelope("")));
    }

    #[test]
    fn debug_redacts_the_token() {
        let verifier = EventVerifier::new(Some("super-secret".into()));
        let debug_output = format!("{verifier:?}");
        assert!(!debug_output.contains("super-secret"));
        assert!(debug_output.contains("[redacted]"));
    }
}
