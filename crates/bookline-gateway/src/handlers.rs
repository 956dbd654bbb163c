// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the webhook endpoint.
//!
//! GET `/webhook` is the provider's verification handshake; POST `/webhook`
//! receives event deliveries, validates their signature, and runs them
//! through the dispatcher.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use bookline_core::{BooklineError, InboundEvent};
use bookline_whatsapp::classifier;

use crate::server::GatewayState;
use crate::signature;

/// Query parameters of the verification handshake.
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// JSON body for non-challenge responses.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn ok() -> Response {
    (
        StatusCode::OK,
        Json(StatusResponse {
            status: "ok",
            message: None,
        }),
    )
        .into_response()
}

fn error_response(code: StatusCode, message: impl Into<String>) -> Response {
    (
        code,
        Json(StatusResponse {
            status: "error",
            message: Some(message.into()),
        }),
    )
        .into_response()
}

/// GET /webhook
///
/// Echoes `hub.challenge` when `hub.mode` is `subscribe` and the verify
/// token matches; 403 on mismatch, 400 when parameters are missing.
pub async fn verify_webhook(
    State(state): State<GatewayState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    let (Some(mode), Some(token)) = (params.mode, params.verify_token) else {
        info!("webhook verification missing parameters");
        return error_response(StatusCode::BAD_REQUEST, "Missing parameters");
    };

    let expected = state.verify_token.as_deref();
    if mode == "subscribe" && expected.is_some_and(|expected| expected == token) {
        info!("webhook verified");
        (StatusCode::OK, params.challenge.unwrap_or_default()).into_response()
    } else {
        info!("webhook verification failed");
        error_response(StatusCode::FORBIDDEN, "Verification failed")
    }
}

/// POST /webhook
///
/// Validates the delivery signature, parses and classifies the payload,
/// and dispatches the event. Unrecognized events return 404 so the
/// provider's dashboard surfaces misrouted subscriptions.
pub async fn receive_webhook(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(ref secret) = state.app_secret {
        let header = headers
            .get("x-hub-signature-256")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");
        if !signature::verify_signature(secret, &body, header) {
            warn!("rejected webhook delivery: invalid signature");
            return error_response(StatusCode::UNAUTHORIZED, "Invalid signature");
        }
    }

    let payload = match classifier::parse_payload(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "failed to decode webhook body");
            return error_response(StatusCode::BAD_REQUEST, "Invalid JSON provided");
        }
    };

    let event = classifier::classify(&payload);
    if event == InboundEvent::Unrecognized {
        return error_response(StatusCode::NOT_FOUND, "Not a WhatsApp API event");
    }

    match state.dispatcher.dispatch(event).await {
        Ok(_) => ok(),
        Err(e @ (BooklineError::Send { .. } | BooklineError::Upload { .. })) => {
            error!(error = %e, "outbound delivery failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        Err(e) => {
            error!(error = %e, "event dispatch failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
