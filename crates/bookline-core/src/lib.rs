// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Bookline appointment bot.
//!
//! This crate provides the shared types, error taxonomy, and the
//! [`ChannelSender`] trait seam used throughout the Bookline workspace.
//! The dialogue core, the webhook gateway, and the WhatsApp client all
//! communicate through the types defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::BooklineError;
pub use traits::ChannelSender;
pub use types::{
    BookingFields, ButtonOption, ConversationState, InboundEvent, MessageId, OutboundMessage,
};
