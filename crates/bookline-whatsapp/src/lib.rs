// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp Cloud API integration for the Bookline appointment bot.
//!
//! Three concerns, kept separate:
//! - [`classifier`]: raw webhook JSON → [`bookline_core::InboundEvent`]
//! - [`payload`]: [`bookline_core::OutboundMessage`] → Cloud API wire format
//! - [`client`]: the reqwest Graph API client (sends + media uploads)
//!   implementing [`bookline_core::ChannelSender`]

pub mod classifier;
pub mod client;
pub mod payload;

pub use classifier::{classify, parse_payload};
pub use client::{CloudApiClient, DocumentSource};
