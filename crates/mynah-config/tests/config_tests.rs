// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Mynah configuration system.

use mynah_config::{load_and_validate_str, load_config_from_str, ConfigError};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_mynah_config() {
    let toml = r#"
[inbound]
verification_token = "verify-me"

[outbound]
app_id = "app-123"
app_secret = "shh"
base_url = "https://messaging.internal"
token_safety_margin_secs = 30
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(
        config.inbound.verification_token.as_deref(),
        Some("verify-me")
    );
    assert_eq!(config.outbound.app_id.as_deref(), Some("app-123"));
    assert_eq!(config.outbound.app_secret.as_deref(), Some("shh"));
    assert_eq!(config.outbound.base_url, "https://messaging.internal");
    assert_eq!(config.outbound.token_safety_margin_secs, 30);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert!(config.inbound.verification_token.is_none());
    assert!(config.outbound.app_id.is_none());
    assert!(config.outbound.app_secret.is_none());
    assert_eq!(config.outbound.token_safety_margin_secs, 60);
}

/// Unknown field in [outbound] section is rejected.
#[test]
fn unknown_field_in_outbound_produces_error() {
    let toml = r#"
[outbound]
app_secert = "oops"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("app_secert"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// A typo'd key surfaces as an UnknownKey diagnostic with a suggestion.
#[test]
fn typo_produces_unknown_key_diagnostic_with_suggestion() {
    let toml = r#"
[inbound]
verfication_token = "verify-me"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject typo'd key");
    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey {
                key, suggestion, ..
            } => Some((key.clone(), suggestion.clone())),
            _ => None,
        })
        .expect("expected an UnknownKey diagnostic");

    assert_eq!(unknown.0, "verfication_token");
    assert_eq!(unknown.1.as_deref(), Some("verification_token"));
}

/// Semantic validation failures are collected, not failed fast.
#[test]
fn validation_collects_semantic_errors() {
    let toml = r#"
[outbound]
base_url = "not-a-url"
token_safety_margin_secs = 90000
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, ConfigError::Validation { .. })));
}

/// A fully valid config passes validation end to end.
#[test]
fn valid_config_passes_validation() {
    let toml = r#"
[inbound]
verification_token = "verify-me"

[outbound]
app_id = "app-123"
app_secret = "shh"
"#;

    let config = load_and_validate_str(toml).expect("config should validate");
    assert_eq!(config.outbound.app_id.as_deref(), Some("app-123"));
}
