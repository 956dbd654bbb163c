// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of [`OutboundMessage`] into the Cloud API wire format.
//!
//! Every payload carries the `messaging_product` and `recipient_type`
//! envelope fields the provider requires. Rendering is kept separate from
//! transport so the wire shapes can be asserted without a network.

use bookline_core::OutboundMessage;
use serde_json::{json, Value};

const MESSAGING_PRODUCT: &str = "whatsapp";
const RECIPIENT_TYPE: &str = "individual";

/// Renders an outbound message addressed to `to` as a Cloud API request body.
pub fn render(to: &str, message: &OutboundMessage) -> Value {
    match message {
        OutboundMessage::TextPrompt { body } => json!({
            "messaging_product": MESSAGING_PRODUCT,
            "recipient_type": RECIPIENT_TYPE,
            "to": to,
            "type": "text",
            "text": {"body": body},
        }),
        OutboundMessage::ButtonPrompt {
            header,
            body,
            footer,
            buttons,
        } => {
            let buttons: Vec<Value> = buttons
                .iter()
                .map(|button| {
                    json!({
                        "type": "reply",
                        "reply": {"id": button.id, "title": button.title},
                    })
                })
                .collect();
            json!({
                "messaging_product": MESSAGING_PRODUCT,
                "recipient_type": RECIPIENT_TYPE,
                "to": to,
                "type": "interactive",
                "interactive": {
                    "type": "button",
                    "header": {"type": "text", "text": header},
                    "body": {"text": body},
                    "footer": {"text": footer},
                    "action": {"buttons": buttons},
                },
            })
        }
        OutboundMessage::MediaDocument { media_id, caption } => json!({
            "messaging_product": MESSAGING_PRODUCT,
            "recipient_type": RECIPIENT_TYPE,
            "to": to,
            "type": "document",
            "document": {"id": media_id, "caption": caption},
        }),
    }
}
