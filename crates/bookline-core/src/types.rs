// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Bookline workspace.

/// Unique identifier for a delivered outbound message, as reported by the
/// messaging provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(pub String);

/// A classified inbound webhook event.
///
/// Produced once by the event classifier so downstream components never
/// touch the raw provider payload shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Delivery/read status callback. Not a conversation turn.
    StatusUpdate,
    /// The user tapped one of a finite set of offered buttons.
    ButtonReply {
        user_id: String,
        button_id: String,
        button_title: String,
    },
    /// A plain text message from the user.
    TextReply { user_id: String, body: String },
    /// Anything the classifier could not map to a known event shape.
    Unrecognized,
}

/// A single reply button offered in a [`OutboundMessage::ButtonPrompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonOption {
    pub id: String,
    pub title: String,
}

/// An outbound message payload, independent of the provider wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    /// A plain text prompt.
    TextPrompt { body: String },
    /// An interactive prompt with an ordered list of reply buttons.
    ButtonPrompt {
        header: String,
        body: String,
        footer: String,
        buttons: Vec<ButtonOption>,
    },
    /// A document attachment referencing a previously uploaded media id.
    MediaDocument { media_id: String, caption: String },
}

/// The fields collected over the course of one booking dialogue.
///
/// Written in order (name, then date, then time) and never unset within a
/// conversation's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFields {
    pub name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

/// One user's progress through the booking dialogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    /// Step cursor over the dialogue script. Starts at 0 and increases by
    /// exactly 1 per turn until the terminal step.
    pub step: u8,
    pub fields: BookingFields,
}

impl ConversationState {
    /// A fresh conversation: step 0, no fields collected.
    pub fn new() -> Self {
        Self::default()
    }
}
