// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./mynah.toml` > `~/.config/mynah/mynah.toml` > `/etc/mynah/mynah.toml`
//! with environment variable overrides via `MYNAH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::MynahConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/mynah/mynah.toml` (system-wide)
/// 3. `~/.config/mynah/mynah.toml` (user XDG config)
/// 4. `./mynah.toml` (local directory)
/// 5. `MYNAH_*` environment variables
pub fn load_config() -> Result<MynahConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MynahConfig::default()))
        .merge(Toml::file("/etc/mynah/mynah.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("mynah/mynah.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("mynah.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and for hosts that hand the engine its configuration as
/// a plain object.
pub fn load_config_from_str(toml_content: &str) -> Result<MynahConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MynahConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MynahConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MynahConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// CRITICAL: Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `MYNAH_INBOUND_VERIFICATION_TOKEN`
/// must map to `inbound.verification_token`, not `inbound.verification.token`.
fn env_provider() -> Env {
    Env::prefixed("MYNAH_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: MYNAH_OUTBOUND_APP_SECRET -> "outbound_app_secret"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("inbound_", "inbound.", 1)
            .replacen("outbound_", "outbound.", 1);
        mapped.into()
    })
}
