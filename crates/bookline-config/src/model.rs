// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Bookline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Bookline configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections default to sensible values; the
/// WhatsApp credentials are the only keys that must be supplied before
/// `serve` will start.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BooklineConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// WhatsApp Business Platform credentials and identifiers.
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    /// Webhook HTTP server settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Confirmation document attachment settings.
    #[serde(default)]
    pub confirmation: ConfirmationConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "bookline".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// WhatsApp Business Platform configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WhatsAppConfig {
    /// Graph API access token. `None` disables outbound delivery.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Token echoed back during the webhook verification handshake.
    #[serde(default)]
    pub verify_token: Option<String>,

    /// App secret used to validate `X-Hub-Signature-256` on deliveries.
    /// `None` disables signature validation (logged as a warning).
    #[serde(default)]
    pub app_secret: Option<String>,

    /// Business phone number identifier used in Graph API paths.
    #[serde(default)]
    pub phone_number_id: Option<String>,

    /// Graph API version segment, e.g. `v18.0`.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Reserved button id that starts the booking dialogue. Must not
    /// collide with date-option ids, which are `YYYY-MM-DD` strings.
    #[serde(default = "default_booking_button_id")]
    pub booking_button_id: String,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            verify_token: None,
            app_secret: None,
            phone_number_id: None,
            api_version: default_api_version(),
            booking_button_id: default_booking_button_id(),
        }
    }
}

fn default_api_version() -> String {
    "v18.0".to_string()
}

fn default_booking_button_id() -> String {
    "book_appt".to_string()
}

/// Webhook HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Confirmation document attachment configuration.
///
/// When `document_path` is set, completed bookings are confirmed with a
/// document message (uploaded per booking); otherwise a plain text
/// confirmation is sent.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConfirmationConfig {
    /// Path to the document attached to booking confirmations.
    #[serde(default)]
    pub document_path: Option<String>,

    /// Filename shown to the recipient.
    #[serde(default = "default_document_filename")]
    pub document_filename: String,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            document_path: None,
            document_filename: default_document_filename(),
        }
    }
}

fn default_document_filename() -> String {
    "appointment.pdf".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = BooklineConfig::default();
        assert_eq!(config.agent.name, "bookline");
        assert_eq!(config.agent.log_level, "info");
        assert_eq!(config.whatsapp.api_version, "v18.0");
        assert_eq!(config.whatsapp.booking_button_id, "book_appt");
        assert_eq!(config.gateway.host, "0.0.0.0");
        assert_eq!(config.gateway.port, 8000);
        assert!(config.whatsapp.access_token.is_none());
        assert!(config.confirmation.document_path.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = r#"
            [whatsapp]
            acces_token = "typo"
        "#;
        let result: Result<BooklineConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn whatsapp_section_parses() {
        let toml = r#"
            [whatsapp]
            access_token = "EAAG..."
            verify_token = "hook-verify"
            phone_number_id = "106540352242922"
            api_version = "v19.0"
        "#;
        let config: BooklineConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.whatsapp.access_token.as_deref(), Some("EAAG..."));
        assert_eq!(config.whatsapp.api_version, "v19.0");
        // Unset keys keep their defaults.
        assert_eq!(config.whatsapp.booking_button_id, "book_appt");
    }
}
