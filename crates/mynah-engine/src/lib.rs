// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Mynah automated message-response engine.
//!
//! Control flow: the [`EventVerifier`] authenticates an inbound envelope,
//! the matcher consults the rule store to pick at most one rule, and the
//! [`ActionExecutor`] carries out the winning rule's action through the
//! credential-cache-backed outbound API.

pub mod engine;
pub mod executor;
pub mod verifier;

pub use engine::ResponseEngine;
pub use executor::{ActionExecutor, DispatchState};
pub use verifier::EventVerifier;
