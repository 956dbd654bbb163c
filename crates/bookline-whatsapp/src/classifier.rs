// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification of raw webhook payloads into [`InboundEvent`]s.
//!
//! All schema navigation over the provider's nested payload happens here,
//! once, so downstream components only ever see the tagged variant.
//! Missing or unexpected fields classify to `Unrecognized` (logged, never
//! raised); only a top-level JSON parse failure is an error.

use bookline_core::{BooklineError, InboundEvent};
use serde_json::Value;
use tracing::debug;

/// Parses a raw webhook body into JSON.
///
/// Parse failure is `InvalidPayload`, surfaced to the HTTP caller as a
/// client error rather than handled locally.
pub fn parse_payload(body: &[u8]) -> Result<Value, BooklineError> {
    serde_json::from_slice(body).map_err(|e| BooklineError::InvalidPayload(e.to_string()))
}

/// Classifies a parsed webhook payload.
pub fn classify(payload: &Value) -> InboundEvent {
    let Some(value) = change_value(payload) else {
        debug!("payload has no entry[0].changes[0].value");
        return InboundEvent::Unrecognized;
    };

    // Status callbacks are not conversation turns; this check short-circuits
    // before any message inspection.
    if value
        .get("statuses")
        .and_then(Value::as_array)
        .is_some_and(|statuses| !statuses.is_empty())
    {
        return InboundEvent::StatusUpdate;
    }

    let Some(message) = value
        .get("messages")
        .and_then(Value::as_array)
        .and_then(|messages| messages.first())
    else {
        debug!("payload has no messages[0]");
        return InboundEvent::Unrecognized;
    };

    let Some(from) = message.get("from").and_then(Value::as_str) else {
        debug!("message has no sender id");
        return InboundEvent::Unrecognized;
    };

    match message.get("type").and_then(Value::as_str) {
        Some("interactive") => classify_interactive(message, from),
        Some("text") => match message
            .get("text")
            .and_then(|text| text.get("body"))
            .and_then(Value::as_str)
        {
            Some(body) => InboundEvent::TextReply {
                user_id: from.to_string(),
                body: body.to_string(),
            },
            None => {
                debug!("text message has no body");
                InboundEvent::Unrecognized
            }
        },
        other => {
            debug!(message_type = ?other, "unsupported message type");
            InboundEvent::Unrecognized
        }
    }
}

fn classify_interactive(message: &Value, from: &str) -> InboundEvent {
    let interactive = message.get("interactive");

    let subtype = interactive
        .and_then(|i| i.get("type"))
        .and_then(Value::as_str);
    if subtype != Some("button_reply") {
        debug!(subtype = ?subtype, "unsupported interactive subtype");
        return InboundEvent::Unrecognized;
    }

    let reply = interactive.and_then(|i| i.get("button_reply"));
    let id = reply.and_then(|r| r.get("id")).and_then(Value::as_str);
    let title = reply.and_then(|r| r.get("title")).and_then(Value::as_str);

    match (id, title) {
        (Some(id), Some(title)) => InboundEvent::ButtonReply {
            user_id: from.to_string(),
            button_id: id.to_string(),
            button_title: title.to_string(),
        },
        _ => {
            debug!("button_reply missing id or title");
            InboundEvent::Unrecognized
        }
    }
}

/// Navigates to `entry[0].changes[0].value`.
fn change_value(payload: &Value) -> Option<&Value> {
    payload
        .get("entry")?
        .as_array()?
        .first()?
        .get("changes")?
        .as_array()?
        .first()?
        .get("value")
}
