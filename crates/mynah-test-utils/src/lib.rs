// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Mynah integration tests: in-memory collaborators and
//! domain-object builders.

pub mod builders;
pub mod mock_api;
pub mod mock_escalations;
pub mod mock_store;

pub use builders::{keyword_reply_rule, new_keyword_reply, text_message};
pub use mock_api::{MockMessagingApi, SentMessage};
pub use mock_escalations::MockEscalationSink;
pub use mock_store::MemoryRecordStore;
