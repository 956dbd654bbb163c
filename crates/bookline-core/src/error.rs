// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Bookline appointment bot.

use thiserror::Error;

/// The primary error type used across the Bookline workspace.
#[derive(Debug, Error)]
pub enum BooklineError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// The inbound webhook body was not valid JSON. Surfaced to the HTTP
    /// caller as a client error; malformed-but-parseable payloads are not
    /// errors and classify to `InboundEvent::Unrecognized` instead.
    #[error("invalid webhook payload: {0}")]
    InvalidPayload(String),

    /// The messaging provider rejected or failed an outbound send.
    #[error("send failed: {message}")]
    Send {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Media upload to the messaging provider failed.
    #[error("media upload failed: {message}")]
    Upload {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
