// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Mynah response engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Mynah configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values;
/// credentials and the verification token have no defaults and must be
/// supplied by the deployment.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MynahConfig {
    /// Inbound transport settings.
    #[serde(default)]
    pub inbound: InboundConfig,

    /// Outbound messaging API settings.
    #[serde(default)]
    pub outbound: OutboundConfig,
}

/// Inbound transport configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InboundConfig {
    /// Verification token expected on every inbound event envelope.
    /// `None` rejects all envelopes (fail-closed).
    #[serde(default)]
    pub verification_token: Option<String>,
}

/// Outbound messaging API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutboundConfig {
    /// Application identifier for the authentication endpoint.
    #[serde(default)]
    pub app_id: Option<String>,

    /// Application secret for the authentication endpoint.
    #[serde(default)]
    pub app_secret: Option<String>,

    /// Base URL of the outbound messaging API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Seconds subtracted from a credential's reported TTL to force
    /// proactive refresh before hard expiry.
    #[serde(default = "default_token_safety_margin_secs")]
    pub token_safety_margin_secs: u64,
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            app_secret: None,
            base_url: default_base_url(),
            token_safety_margin_secs: default_token_safety_margin_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.example-messaging.dev".to_string()
}

fn default_token_safety_margin_secs() -> u64 {
    60
}
