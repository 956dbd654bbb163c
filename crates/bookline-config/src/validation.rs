// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation of the configuration model.
//!
//! Catches values that deserialize fine but cannot work at runtime, such
//! as a booking trigger id that collides with the date-option button ids.

use thiserror::Error;

use crate::model::BooklineConfig;

/// A single configuration validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config key `{key}`: {reason}")]
    Invalid { key: String, reason: String },
}

/// Validates a deserialized config, collecting every failure.
pub fn validate_config(config: &BooklineConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.whatsapp.booking_button_id.trim().is_empty() {
        errors.push(ConfigError::Invalid {
            key: "whatsapp.booking_button_id".into(),
            reason: "must not be empty".into(),
        });
    }

    // Date-option buttons use YYYY-MM-DD ids; the booking trigger must
    // never be mistaken for one of them.
    if looks_like_date(&config.whatsapp.booking_button_id) {
        errors.push(ConfigError::Invalid {
            key: "whatsapp.booking_button_id".into(),
            reason: "must not be a YYYY-MM-DD date string (collides with date buttons)".into(),
        });
    }

    if !config.whatsapp.api_version.starts_with('v') {
        errors.push(ConfigError::Invalid {
            key: "whatsapp.api_version".into(),
            reason: format!(
                "expected a Graph API version like `v18.0`, got `{}`",
                config.whatsapp.api_version
            ),
        });
    }

    if config.gateway.port == 0 {
        errors.push(ConfigError::Invalid {
            key: "gateway.port".into(),
            reason: "must be nonzero".into(),
        });
    }

    if config.confirmation.document_filename.trim().is_empty() {
        errors.push(ConfigError::Invalid {
            key: "confirmation.document_filename".into(),
            reason: "must not be empty".into(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// True if `s` has the exact `YYYY-MM-DD` shape of a date button id.
fn looks_like_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BooklineConfig;

    #[test]
    fn default_config_is_valid() {
        let config = BooklineConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_date_shaped_trigger_id() {
        let mut config = BooklineConfig::default();
        config.whatsapp.booking_button_id = "2026-08-27".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("booking_button_id"));
    }

    #[test]
    fn rejects_empty_trigger_id() {
        let mut config = BooklineConfig::default();
        config.whatsapp.booking_button_id = "  ".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_bad_api_version_and_zero_port() {
        let mut config = BooklineConfig::default();
        config.whatsapp.api_version = "18.0".into();
        config.gateway.port = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn date_shape_detection() {
        assert!(looks_like_date("2026-08-27"));
        assert!(!looks_like_date("book_appt"));
        assert!(!looks_like_date("2026-8-27"));
        assert!(!looks_like_date("2026-08-27T00"));
    }
}
