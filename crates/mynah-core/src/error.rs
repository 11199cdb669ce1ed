// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Mynah response engine.

use thiserror::Error;

/// The primary error type used across the Mynah workspace.
#[derive(Debug, Error)]
pub enum MynahError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Record store errors (backend failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Authentication against the outbound messaging API failed or returned
    /// malformed data. Propagated to the caller of `get_token`, never swallowed.
    #[error("credential error: {message}")]
    Credential {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A rule store operation referenced a missing identifier.
    #[error("rule not found: {id}")]
    NotFound { id: String },

    /// An outbound send failed. Logged with rule and message context by the
    /// executor; never crashes the inbound-event handler.
    #[error("dispatch error: {message}")]
    Dispatch {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Template rendering failed or no renderer is configured.
    #[error("template error: {message}")]
    Template { message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
