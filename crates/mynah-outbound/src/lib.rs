// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound messaging for the Mynah response engine.
//!
//! Provides the production [`MessagingApi`](mynah_core::MessagingApi)
//! implementation over HTTP and the [`CredentialCache`] that keeps it
//! usable without per-call re-authentication.

pub mod client;
pub mod credentials;
pub mod types;

pub use client::OutboundClient;
pub use credentials::CredentialCache;
