// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook HTTP server built on axum.
//!
//! Sets up routes, the trace layer, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use bookline_core::BooklineError;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::dispatch::Dispatcher;
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The event dispatcher behind the POST handler.
    pub dispatcher: Arc<Dispatcher>,
    /// Token expected during the GET verification handshake.
    pub verify_token: Option<String>,
    /// App secret for delivery signature validation. `None` disables the
    /// check.
    pub app_secret: Option<String>,
}

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the webhook router.
pub fn router(state: GatewayState) -> Router {
    if state.app_secret.is_none() {
        warn!("no app secret configured -- webhook signature validation is disabled");
    }

    Router::new()
        .route(
            "/webhook",
            get(handlers::verify_webhook).post(handlers::receive_webhook),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the webhook HTTP server.
///
/// Binds to the configured host:port and serves:
/// - GET /webhook (verification handshake)
/// - POST /webhook (event deliveries)
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), BooklineError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BooklineError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("webhook server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| BooklineError::Internal(format!("webhook server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature;
    use crate::testing::MockSender;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use bookline_dialog::ConversationStore;
    use serde_json::json;
    use tower::ServiceExt;

    fn test_state(app_secret: Option<&str>) -> GatewayState {
        let dispatcher = Dispatcher::new(
            Arc::new(ConversationStore::new()),
            Arc::new(MockSender::new()),
            "book_appt".into(),
            false,
        );
        GatewayState {
            dispatcher: Arc::new(dispatcher),
            verify_token: Some("verify-me".into()),
            app_secret: app_secret.map(str::to_string),
        }
    }

    fn text_delivery() -> String {
        json!({
            "entry": [{"changes": [{"value": {
                "messages": [{"from": "15550001111", "type": "text", "text": {"body": "hi"}}]
            }}]}]
        })
        .to_string()
    }

    #[tokio::test]
    async fn verification_handshake_echoes_challenge() {
        let app = router(test_state(None));
        let response = app
            .oneshot(
                Request::get(
                    "/webhook?hub.mode=subscribe&hub.verify_token=verify-me&hub.challenge=42",
                )
                .body(Body::empty())
                .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn verification_with_wrong_token_is_forbidden() {
        let app = router(test_state(None));
        let response = app
            .oneshot(
                Request::get("/webhook?hub.mode=subscribe&hub.verify_token=wrong&hub.challenge=42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn verification_without_params_is_bad_request() {
        let app = router(test_state(None));
        let response = app
            .oneshot(Request::get("/webhook").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delivery_with_valid_signature_is_accepted() {
        let app = router(test_state(Some("secret")));
        let body = text_delivery();
        let sig = signature::sign("secret", body.as_bytes());
        let response = app
            .oneshot(
                Request::post("/webhook")
                    .header("x-hub-signature-256", sig)
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn delivery_with_bad_signature_is_unauthorized() {
        let app = router(test_state(Some("secret")));
        let response = app
            .oneshot(
                Request::post("/webhook")
                    .header("x-hub-signature-256", "sha256=deadbeef")
                    .body(Body::from(text_delivery()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_json_is_bad_request() {
        let app = router(test_state(None));
        let response = app
            .oneshot(
                Request::post("/webhook")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unrecognized_event_is_not_found() {
        let app = router(test_state(None));
        let response = app
            .oneshot(
                Request::post("/webhook")
                    .body(Body::from(r#"{"unexpected": true}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn status_callback_is_acknowledged() {
        let app = router(test_state(None));
        let body = json!({
            "entry": [{"changes": [{"value": {
                "statuses": [{"id": "wamid.1", "status": "read"}]
            }}]}]
        })
        .to_string();
        let response = app
            .oneshot(Request::post("/webhook").body(Body::from(body)).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
