// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `bookline serve` command implementation.
//!
//! Wires the configured Cloud API client, conversation store, and
//! dispatcher into the webhook HTTP server and runs it until shutdown.

use std::path::PathBuf;
use std::sync::Arc;

use bookline_config::BooklineConfig;
use bookline_core::BooklineError;
use bookline_dialog::ConversationStore;
use bookline_gateway::{start_server, Dispatcher, GatewayState, ServerConfig};
use bookline_whatsapp::{CloudApiClient, DocumentSource};
use tracing::{info, warn};

/// Runs the `bookline serve` command.
pub async fn run_serve(config: BooklineConfig) -> Result<(), BooklineError> {
    init_tracing(&config.agent.log_level);

    info!(agent = %config.agent.name, "starting bookline serve");

    let access_token = config.whatsapp.access_token.as_deref().ok_or_else(|| {
        BooklineError::Config("whatsapp.access_token is required for serve".to_string())
    })?;
    let phone_number_id = config.whatsapp.phone_number_id.clone().ok_or_else(|| {
        BooklineError::Config("whatsapp.phone_number_id is required for serve".to_string())
    })?;

    if config.whatsapp.verify_token.is_none() {
        warn!("no verify token configured -- webhook verification handshake will be rejected");
    }

    let document = config.confirmation.document_path.as_ref().map(|path| {
        DocumentSource {
            path: PathBuf::from(path),
            filename: config.confirmation.document_filename.clone(),
        }
    });
    let attach_document = document.is_some();

    let client = CloudApiClient::new(
        access_token,
        config.whatsapp.api_version.clone(),
        phone_number_id,
        document,
    )?;

    let store = Arc::new(ConversationStore::new());
    let dispatcher = Dispatcher::new(
        Arc::clone(&store),
        Arc::new(client),
        config.whatsapp.booking_button_id.clone(),
        attach_document,
    );

    let state = GatewayState {
        dispatcher: Arc::new(dispatcher),
        verify_token: config.whatsapp.verify_token.clone(),
        app_secret: config.whatsapp.app_secret.clone(),
    };

    let server = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    start_server(&server, state).await
}

/// Initializes the tracing subscriber with the configured log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bookline={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
