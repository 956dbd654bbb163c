// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./bookline.toml` > `~/.config/bookline/bookline.toml`
//! > `/etc/bookline/bookline.toml`, with environment variable overrides via
//! the `BOOKLINE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::BooklineConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/bookline/bookline.toml` (system-wide)
/// 3. `~/.config/bookline/bookline.toml` (user XDG config)
/// 4. `./bookline.toml` (local directory)
/// 5. `BOOKLINE_*` environment variables
pub fn load_config() -> Result<BooklineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BooklineConfig::default()))
        .merge(Toml::file("/etc/bookline/bookline.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("bookline/bookline.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("bookline.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<BooklineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BooklineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BooklineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BooklineConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `BOOKLINE_WHATSAPP_ACCESS_TOKEN` must
/// map to `whatsapp.access_token`, not `whatsapp.access.token`.
fn env_provider() -> Env {
    Env::prefixed("BOOKLINE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: BOOKLINE_WHATSAPP_ACCESS_TOKEN -> "whatsapp_access_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("whatsapp_", "whatsapp.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("confirmation_", "confirmation.", 1);
        mapped.into()
    })
}
