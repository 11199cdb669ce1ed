// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as URL shape and sane safety margins.

use crate::diagnostic::ConfigError;
use crate::model::MynahConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &MynahConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate base_url looks like an http(s) URL.
    let base_url = config.outbound.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "outbound.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("outbound.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    // A safety margin at or beyond a day would make every credential stale on arrival.
    if config.outbound.token_safety_margin_secs >= 86_400 {
        errors.push(ConfigError::Validation {
            message: format!(
                "outbound.token_safety_margin_secs must be below 86400, got {}",
                config.outbound.token_safety_margin_secs
            ),
        });
    }

    // Credentials, when present, must not be blank.
    if let Some(ref app_id) = config.outbound.app_id
        && app_id.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "outbound.app_id must not be blank".to_string(),
        });
    }

    if let Some(ref app_secret) = config.outbound.app_secret
        && app_secret.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "outbound.app_secret must not be blank".to_string(),
        });
    }

    if let Some(ref token) = config.inbound.verification_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "inbound.verification_token must not be blank".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MynahConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&MynahConfig::default()).is_ok());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = MynahConfig::default();
        config.outbound.base_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("base_url"));
    }

    #[test]
    fn rejects_excessive_safety_margin() {
        let mut config = MynahConfig::default();
        config.outbound.token_safety_margin_secs = 86_400;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_blank_credentials() {
        let mut config = MynahConfig::default();
        config.outbound.app_id = Some("  ".to_string());
        config.outbound.app_secret = Some(String::new());
        config.inbound.verification_token = Some(String::new());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn collects_all_errors_instead_of_failing_fast() {
        let mut config = MynahConfig::default();
        config.outbound.base_url = String::new();
        config.outbound.token_safety_margin_secs = 100_000;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
