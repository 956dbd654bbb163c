// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seam between the dialogue core and the messaging provider.

use async_trait::async_trait;

use crate::error::BooklineError;
use crate::types::{MessageId, OutboundMessage};

/// Outbound delivery collaborator.
///
/// The dispatcher hands every composed [`OutboundMessage`] to this trait
/// and never performs HTTP itself, so tests can substitute a mock sender.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// Delivers a message to the given recipient.
    async fn send(
        &self,
        to: &str,
        message: &OutboundMessage,
    ) -> Result<MessageId, BooklineError>;

    /// Uploads the configured confirmation document and returns its media
    /// identifier. Called once per completed booking, before the document
    /// confirmation is composed.
    async fn upload_confirmation_document(&self) -> Result<String, BooklineError>;
}
