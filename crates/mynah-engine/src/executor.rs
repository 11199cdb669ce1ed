// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Carries out a matched rule's action.
//!
//! Each invocation walks `Pending -> (Delayed) -> Dispatching -> {Sent |
//! Failed}`, with a final `-> Escalated` transition when the rule flags the
//! conversation for human hand-off. An empty action skips the send
//! (`Skipped`) but never the escalation. The executor is the only component
//! here that touches I/O; matching stays a pure function.

use std::sync::Arc;
use std::time::Duration;

use mynah_core::{
    EscalationSink, InboundMessage, MessagingApi, MessageId, MynahError, TemplateRenderer,
};
use mynah_outbound::CredentialCache;
use mynah_rules::{ResponseRule, RuleAction};
use tracing::{debug, error, info};
use uuid::Uuid;

/// States of one execution, in transition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Rule accepted, nothing done yet.
    Pending,
    /// Waiting out the rule's configured delay.
    Delayed,
    /// Building the attempt and calling the outbound API.
    Dispatching,
    /// The outbound API accepted the message.
    Sent,
    /// The action was empty; no send was attempted.
    Skipped,
    /// The outbound send failed. Reported, never retried here.
    Failed,
    /// The conversation was flagged for human hand-off.
    Escalated,
}

impl std::fmt::Display for DispatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchState::Pending => write!(f, "pending"),
            DispatchState::Delayed => write!(f, "delayed"),
            DispatchState::Dispatching => write!(f, "dispatching"),
            DispatchState::Sent => write!(f, "sent"),
            DispatchState::Skipped => write!(f, "skipped"),
            DispatchState::Failed => write!(f, "failed"),
            DispatchState::Escalated => write!(f, "escalated"),
        }
    }
}

/// Executes matched rules against the outbound messaging API.
pub struct ActionExecutor {
    api: Arc<dyn MessagingApi>,
    credentials: Arc<CredentialCache>,
    renderer: Option<Arc<dyn TemplateRenderer>>,
    escalations: Arc<dyn EscalationSink>,
}

impl ActionExecutor {
    pub fn new(
        api: Arc<dyn MessagingApi>,
        credentials: Arc<CredentialCache>,
        renderer: Option<Arc<dyn TemplateRenderer>>,
        escalations: Arc<dyn EscalationSink>,
    ) -> Self {
        Self {
            api,
            credentials,
            renderer,
            escalations,
        }
    }

    /// Runs the rule's action for `message` to a terminal state.
    ///
    /// There is no cancellation path: once accepted, the execution runs to
    /// completion or failure even if the conversation has moved on during a
    /// delay window. Callers spawn this on its own task, so the delay is a
    /// scheduled timer and unrelated messages are never blocked.
    pub async fn execute(&self, rule: &ResponseRule, message: &InboundMessage) -> DispatchState {
        let mut state = DispatchState::Pending;

        if rule.delay_ms > 0 {
            state = DispatchState::Delayed;
            debug!(
                rule_id = %rule.id.0,
                message_id = %message.id.0,
                delay_ms = rule.delay_ms,
                state = %state,
                "delaying dispatch"
            );
            tokio::time::sleep(Duration::from_millis(rule.delay_ms)).await;
        }

        state = if rule.action.is_empty() {
            debug!(rule_id = %rule.id.0, "action content is empty, skipping send");
            DispatchState::Skipped
        } else {
            match self.dispatch(rule, message).await {
                Ok(sent_id) => {
                    info!(
                        rule_id = %rule.id.0,
                        message_id = %message.id.0,
                        sent_message_id = %sent_id.0,
                        "auto-response sent"
                    );
                    DispatchState::Sent
                }
                Err(e) => {
                    error!(
                        rule_id = %rule.id.0,
                        message_id = %message.id.0,
                        error = %e,
                        "dispatch failed"
                    );
                    DispatchState::Failed
                }
            }
        };

        // A failed dispatch must not leave a human unaware of an unresolved
        // request, so escalation happens regardless of the send outcome.
        if rule.escalate_to_human {
            match self
                .escalations
                .flag_for_handoff(&message.conversation_id, &message.id)
                .await
            {
                Ok(()) => {
                    info!(
                        rule_id = %rule.id.0,
                        conversation_id = %message.conversation_id.0,
                        "conversation flagged for human hand-off"
                    );
                    state = DispatchState::Escalated;
                }
                Err(e) => {
                    error!(
                        rule_id = %rule.id.0,
                        conversation_id = %message.conversation_id.0,
                        error = %e,
                        "failed to flag conversation for hand-off"
                    );
                }
            }
        }

        state
    }

    /// One dispatch attempt: token, fresh idempotency token, send.
    ///
    /// Idempotency tokens are never reused across attempts, so delivery is
    /// at-least-once at best, not exactly-once.
    async fn dispatch(
        &self,
        rule: &ResponseRule,
        message: &InboundMessage,
    ) -> Result<MessageId, MynahError> {
        let payload = self.build_payload(&rule.action).await?;
        let token = self.credentials.get_token().await?;
        let idempotency_token = Uuid::new_v4().to_string();

        let state = DispatchState::Dispatching;
        debug!(
            rule_id = %rule.id.0,
            message_id = %message.id.0,
            kind = %rule.action.kind(),
            state = %state,
            "dispatching auto-response"
        );

        self.api
            .send(
                &token,
                &message.conversation_id,
                rule.action.kind(),
                &payload,
                &idempotency_token,
            )
            .await
    }

    async fn build_payload(&self, action: &RuleAction) -> Result<serde_json::Value, MynahError> {
        match action {
            RuleAction::Text { content } => Ok(serde_json::Value::String(content.clone())),
            RuleAction::Card { payload } => Ok(payload.clone()),
            RuleAction::Template { name, params } => match self.renderer {
                Some(ref renderer) => renderer.render(name, params).await,
                None => Err(MynahError::Template {
                    message: format!("no template renderer configured for template `{name}`"),
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mynah_config::OutboundConfig;
    use mynah_test_utils::{keyword_reply_rule, text_message, MockEscalationSink, MockMessagingApi};

    fn outbound_config() -> OutboundConfig {
        OutboundConfig {
            app_id: Some("app-1".into()),
            app_secret: Some("secret".into()),
            base_url: "https://unused.invalid".into(),
            token_safety_margin_secs: 60,
        }
    }

    struct Fixture {
        api: Arc<MockMessagingApi>,
        escalations: Arc<MockEscalationSink>,
        executor: ActionExecutor,
    }

    fn fixture() -> Fixture {
        fixture_with_renderer(None)
    }

    fn fixture_with_renderer(renderer: Option<Arc<dyn TemplateRenderer>>) -> Fixture {
        let api = Arc::new(MockMessagingApi::new());
        let escalations = Arc::new(MockEscalationSink::new());
        let credentials = Arc::new(
            CredentialCache::new(Arc::clone(&api) as Arc<dyn MessagingApi>, &outbound_config())
                .unwrap(),
        );
        let executor = ActionExecutor::new(
            Arc::clone(&api) as Arc<dyn MessagingApi>,
            credentials,
            renderer,
            Arc::clone(&escalations) as Arc<dyn EscalationSink>,
        );
        Fixture {
            api,
            escalations,
            executor,
        }
    }

    #[tokio::test]
    async fn text_action_dispatches_literal_content() {
        let fx = fixture();
        let rule = keyword_reply_rule("r1", 1, &["hello"], "Hi, how can I help?");
        let message = text_message("m1", "conv-1", "hello there");

        let state = fx.executor.execute(&rule, &message).await;
        assert_eq!(state, DispatchState::Sent);

        let sent = fx.api.sent_messages().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].payload, serde_json::json!("Hi, how can I help?"));
        assert_eq!(sent[0].conversation_id.0, "conv-1");
        assert_eq!(sent[0].kind, mynah_core::ActionKind::Text);
        assert!(!sent[0].idempotency_token.is_empty());
    }

    #[tokio::test]
    async fn each_attempt_gets_a_fresh_idempotency_token() {
        let fx = fixture();
        let rule = keyword_reply_rule("r1", 1, &[], "hi");
        let message = text_message("m1", "conv-1", "hello");

        fx.executor.execute(&rule, &message).await;
        fx.executor.execute(&rule, &message).await;

        let sent = fx.api.sent_messages().await;
        assert_eq!(sent.len(), 2);
        assert_ne!(sent[0].idempotency_token, sent[1].idempotency_token);
    }

    #[tokio::test]
    async fn failed_dispatch_reports_failed_without_escalation() {
        let fx = fixture();
        fx.api.set_fail_sends(true).await;
        let rule = keyword_reply_rule("r1", 1, &[], "hi");
        let message = text_message("m1", "conv-1", "hello");

        let state = fx.executor.execute(&rule, &message).await;
        assert_eq!(state, DispatchState::Failed);
        assert!(fx.escalations.flagged().await.is_empty());
    }

    #[tokio::test]
    async fn failed_dispatch_still_escalates_when_flagged() {
        let fx = fixture();
        fx.api.set_fail_sends(true).await;
        let mut rule = keyword_reply_rule("r1", 1, &[], "hi");
        rule.escalate_to_human = true;
        let message = text_message("m1", "conv-1", "hello");

        let state = fx.executor.execute(&rule, &message).await;
        assert_eq!(state, DispatchState::Escalated);

        let flagged = fx.escalations.flagged().await;
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].0 .0, "conv-1");
        assert_eq!(flagged[0].1 .0, "m1");
    }

    #[tokio::test]
    async fn empty_action_skips_send_but_escalates() {
        let fx = fixture();
        let mut rule = keyword_reply_rule("r1", 1, &[], "");
        rule.escalate_to_human = true;
        let message = text_message("m1", "conv-1", "hello");

        let state = fx.executor.execute(&rule, &message).await;
        assert_eq!(state, DispatchState::Escalated);
        assert!(fx.api.sent_messages().await.is_empty());
        assert_eq!(fx.escalations.flagged().await.len(), 1);
    }

    #[tokio::test]
    async fn empty_action_without_escalation_is_skipped() {
        let fx = fixture();
        let rule = keyword_reply_rule("r1", 1, &[], "  ");
        let message = text_message("m1", "conv-1", "hello");

        let state = fx.executor.execute(&rule, &message).await;
        assert_eq!(state, DispatchState::Skipped);
        assert!(fx.api.sent_messages().await.is_empty());
    }

    #[tokio::test]
    async fn escalation_sink_failure_keeps_prior_state() {
        let fx = fixture();
        fx.escalations.set_fail(true).await;
        let mut rule = keyword_reply_rule("r1", 1, &[], "hi");
        rule.escalate_to_human = true;
        let message = text_message("m1", "conv-1", "hello");

        let state = fx.executor.execute(&rule, &message).await;
        assert_eq!(state, DispatchState::Sent);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_waited_out_before_dispatch() {
        let fx = fixture();
        let mut rule = keyword_reply_rule("r1", 1, &[], "later");
        rule.delay_ms = 5_000;
        let message = text_message("m1", "conv-1", "hello");

        let state = fx.executor.execute(&rule, &message).await;
        assert_eq!(state, DispatchState::Sent);
        assert_eq!(fx.api.sent_messages().await.len(), 1);
    }

    #[tokio::test]
    async fn template_action_without_renderer_fails() {
        let fx = fixture();
        let mut rule = keyword_reply_rule("r1", 1, &[], "unused");
        rule.action = mynah_rules::RuleAction::Template {
            name: "welcome".into(),
            params: serde_json::json!({"user": "alice"}),
        };
        let message = text_message("m1", "conv-1", "hello");

        let state = fx.executor.execute(&rule, &message).await;
        assert_eq!(state, DispatchState::Failed);
        assert!(fx.api.sent_messages().await.is_empty());
    }

    struct UpperRenderer;

    #[async_trait]
    impl TemplateRenderer for UpperRenderer {
        async fn render(
            &self,
            template: &str,
            params: &serde_json::Value,
        ) -> Result<serde_json::Value, MynahError> {
            Ok(serde_json::json!({
                "template": template.to_uppercase(),
                "params": params,
            }))
        }
    }

    #[tokio::test]
    async fn template_action_sends_rendered_payload() {
        let fx = fixture_with_renderer(Some(Arc::new(UpperRenderer)));
        let mut rule = keyword_reply_rule("r1", 1, &[], "unused");
        rule.action = mynah_rules::RuleAction::Template {
            name: "welcome".into(),
            params: serde_json::json!({"user": "alice"}),
        };
        let message = text_message("m1", "conv-1", "hello");

        let state = fx.executor.execute(&rule, &message).await;
        assert_eq!(state, DispatchState::Sent);

        let sent = fx.api.sent_messages().await;
        assert_eq!(sent[0].kind, mynah_core::ActionKind::Template);
        assert_eq!(sent[0].payload["template"], "WELCOME");
    }
}
