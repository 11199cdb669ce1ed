// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response rules for the Mynah engine: the operator-authored rule model,
//! the rule store, and the deterministic first-match-wins matcher.

pub mod matcher;
pub mod rule;
pub mod store;

pub use matcher::{rule_matches, select_rule};
pub use rule::{ConditionSet, NewRule, ResponseRule, RuleAction, RulePatch, TimeWindow};
pub use store::RuleStore;
