// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions for the Mynah response engine.
//!
//! The engine owns no I/O backends of its own: persistence, the outbound
//! messaging API, template rendering, and escalation hand-off are all
//! injected through these traits. All use `#[async_trait]` for dynamic
//! dispatch compatibility.

pub mod escalation;
pub mod messaging;
pub mod render;
pub mod store;

// Re-export all traits at the traits module level for convenience.
pub use escalation::EscalationSink;
pub use messaging::MessagingApi;
pub use render::TemplateRenderer;
pub use store::RecordStore;
