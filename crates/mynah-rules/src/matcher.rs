// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic rule selection.
//!
//! First-match-wins, not best-match: operators control precedence purely
//! through `priority` and creation order, and at most one rule fires per
//! inbound message. Selection is a pure function of (message, rules, time)
//! so it can be tested without the executor or any I/O.

use chrono::NaiveTime;
use mynah_core::{InboundMessage, MynahError};
use tracing::warn;

use crate::rule::ResponseRule;

/// Selects the winning rule for `message`, or `None`.
///
/// Active rules are ordered by ascending `priority`, then by creation time
/// (earliest first), then by id for a total order; the first rule whose
/// condition set holds wins. A rule whose conditions fail to evaluate (for
/// example a malformed time window) is logged and treated as non-matching
/// without aborting the scan.
pub fn select_rule<'a>(
    message: &InboundMessage,
    rules: &'a [ResponseRule],
    now: NaiveTime,
) -> Option<&'a ResponseRule> {
    let mut candidates: Vec<&ResponseRule> = rules.iter().filter(|r| r.active).collect();
    candidates.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });

    candidates
        .into_iter()
        .find(|rule| match rule_matches(message, rule, now) {
            Ok(matched) => matched,
            Err(e) => {
                warn!(
                    rule_id = %rule.id.0,
                    error = %e,
                    "condition evaluation failed; treating rule as non-matching"
                );
                false
            }
        })
}

/// Whether every clause of `rule`'s condition set holds for `message` at `now`.
///
/// Clauses AND together; an unset clause is vacuously true.
pub fn rule_matches(
    message: &InboundMessage,
    rule: &ResponseRule,
    now: NaiveTime,
) -> Result<bool, MynahError> {
    let conditions = &rule.conditions;

    if !keyword_clause(&conditions.keywords, &message.content) {
        return Ok(false);
    }
    if !allows(&conditions.content_kinds, &message.content_kind) {
        return Ok(false);
    }
    if !allows(&conditions.conversation_kinds, &message.conversation_kind) {
        return Ok(false);
    }
    if !allows(&conditions.sender_kinds, &message.sender_kind) {
        return Ok(false);
    }
    if let Some(ref window) = conditions.time_window
        && !window.contains(now)?
    {
        return Ok(false);
    }

    Ok(true)
}

/// Any-keyword, case-insensitive substring match. No keywords, no constraint.
fn keyword_clause(keywords: &[String], text: &str) -> bool {
    if keywords.is_empty() {
        return true;
    }
    let haystack = text.to_lowercase();
    keywords.iter().any(|kw| haystack.contains(&kw.to_lowercase()))
}

/// Membership clause. An empty allow-list constrains nothing.
fn allows<T: PartialEq>(allowed: &[T], actual: &T) -> bool {
    allowed.is_empty() || allowed.contains(actual)
}
