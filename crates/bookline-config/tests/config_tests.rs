// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for config loading and validation.

use bookline_config::{load_and_validate_str, load_config_from_str};

#[test]
fn empty_config_loads_with_defaults() {
    let config = load_config_from_str("").expect("empty config should load");
    assert_eq!(config.agent.name, "bookline");
    assert_eq!(config.whatsapp.booking_button_id, "book_appt");
    assert_eq!(config.gateway.port, 8000);
}

#[test]
fn full_config_round_trip() {
    let toml = r#"
        [agent]
        name = "clinic-bot"
        log_level = "debug"

        [whatsapp]
        access_token = "EAAG-test"
        verify_token = "verify-me"
        app_secret = "shhh"
        phone_number_id = "106540352242922"
        api_version = "v19.0"
        booking_button_id = "book_appt"

        [gateway]
        host = "127.0.0.1"
        port = 8080

        [confirmation]
        document_path = "/srv/bookline/welcome.pdf"
        document_filename = "welcome.pdf"
    "#;

    let config = load_and_validate_str(toml).expect("config should validate");
    assert_eq!(config.agent.name, "clinic-bot");
    assert_eq!(config.whatsapp.app_secret.as_deref(), Some("shhh"));
    assert_eq!(config.gateway.port, 8080);
    assert_eq!(
        config.confirmation.document_path.as_deref(),
        Some("/srv/bookline/welcome.pdf")
    );
}

#[test]
fn validation_failure_is_reported() {
    let toml = r#"
        [whatsapp]
        booking_button_id = "2026-01-01"
    "#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(!errors.is_empty());
    assert!(errors[0].to_string().contains("booking_button_id"));
}

#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
        [telegram]
        bot_token = "nope"
    "#;
    assert!(load_and_validate_str(toml).is_err());
}
