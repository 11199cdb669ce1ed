// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The engine's sole ingress.
//!
//! `handle_event` verifies the envelope, routes `message-received` events
//! through the matcher, and spawns the executor for the winning rule.
//! Malformed or unverifiable envelopes are dropped with a logged warning —
//! there is no reply channel to the transport — and any downstream failure
//! degrades to "no auto-response this time", never to a handler crash.

use std::sync::Arc;

use mynah_core::{EventEnvelope, InboundMessage, MESSAGE_RECEIVED_EVENT};
use mynah_rules::{select_rule, RuleStore};
use tracing::{debug, info, warn};

use crate::executor::ActionExecutor;
use crate::verifier::EventVerifier;

/// Watches inbound events and auto-responds per the operator's rules.
///
/// Each instance owns its rule store and executor, so multiple engines
/// (for example one per tenant) coexist without shared mutable state.
pub struct ResponseEngine {
    verifier: EventVerifier,
    rules: Arc<RuleStore>,
    executor: Arc<ActionExecutor>,
}

impl ResponseEngine {
    pub fn new(
        verifier: EventVerifier,
        rules: Arc<RuleStore>,
        executor: Arc<ActionExecutor>,
    ) -> Self {
        Self {
            verifier,
            rules,
            executor,
        }
    }

    /// Handles one inbound event envelope.
    ///
    /// Matching runs inline, in arrival order per caller; execution is
    /// spawned onto its own task so a rule's delay never blocks unrelated
    /// messages.
    pub async fn handle_event(&self, envelope: EventEnvelope) {
        if !self.verifier.verify(&envelope) {
            warn!(
                event_type = %envelope.event_type,
                "dropping envelope that failed verification"
            );
            return;
        }

        if envelope.event_type != MESSAGE_RECEIVED_EVENT {
            debug!(event_type = %envelope.event_type, "ignoring event type");
            return;
        }

        let message: InboundMessage = match serde_json::from_value(envelope.payload) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "dropping malformed message payload");
                return;
            }
        };

        let rules = self.rules.list().await;
        let now = chrono::Local::now().time();
        let Some(rule) = select_rule(&message, &rules, now) else {
            debug!(message_id = %message.id.0, "no rule matched");
            return;
        };

        info!(
            rule_id = %rule.id.0,
            message_id = %message.id.0,
            "rule matched, scheduling response"
        );

        let rule = rule.clone();
        let executor = Arc::clone(&self.executor);
        tokio::spawn(async move {
            let state = executor.execute(&rule, &message).await;
            debug!(rule_id = %rule.id.0, state = %state, "execution finished");
        });
    }
}
