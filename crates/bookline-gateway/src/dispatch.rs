// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event-driven control: classify → store → advance → send.
//!
//! The dispatcher holds no conversation state of its own. For every turn
//! it acquires the sender's per-user store guard, so overlapping
//! deliveries for one user apply exactly one step increment each, and a
//! user's next step never starts before the current step's outbound call
//! has been dispatched.

use std::sync::Arc;

use bookline_core::{BooklineError, ChannelSender, InboundEvent, OutboundMessage};
use bookline_dialog::{composer, ConversationStore, Dialogue, Turn};
use tracing::{debug, info};

/// How the dispatcher resolved an event. Mapped to an HTTP status by the
/// webhook handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// A status callback; acknowledged without touching any conversation.
    Status,
    /// A dialogue turn (or the booking menu) was processed and delivered.
    Handled,
    /// The event carried no action for the bot.
    Ignored,
}

/// Orchestrates inbound events into dialogue turns and outbound sends.
pub struct Dispatcher {
    store: Arc<ConversationStore>,
    dialogue: Dialogue,
    sender: Arc<dyn ChannelSender>,
    booking_button_id: String,
    attach_document: bool,
}

impl Dispatcher {
    /// Creates a dispatcher around a store and a delivery channel.
    ///
    /// `attach_document` selects the document-attachment confirmation
    /// variant; the sender must then be able to upload the configured
    /// document.
    pub fn new(
        store: Arc<ConversationStore>,
        sender: Arc<dyn ChannelSender>,
        booking_button_id: String,
        attach_document: bool,
    ) -> Self {
        let dialogue = Dialogue::new(Arc::clone(&store));
        Self {
            store,
            dialogue,
            sender,
            booking_button_id,
            attach_document,
        }
    }

    /// Handles one classified inbound event.
    pub async fn dispatch(&self, event: InboundEvent) -> Result<Disposition, BooklineError> {
        match event {
            InboundEvent::StatusUpdate => {
                debug!("received a status update");
                Ok(Disposition::Status)
            }
            InboundEvent::Unrecognized => Ok(Disposition::Ignored),
            InboundEvent::ButtonReply {
                user_id,
                button_id,
                button_title,
            } => {
                let _guard = self.store.acquire(&user_id).await;
                if button_id == self.booking_button_id {
                    self.start_booking(&user_id).await
                } else if self.store.exists(&user_id) {
                    self.run_turn(&user_id, Some(&button_title)).await
                } else {
                    // A non-booking button outside any dialogue carries no
                    // action for the bot.
                    debug!(user_id, button_id, "ignoring button reply outside dialogue");
                    Ok(Disposition::Ignored)
                }
            }
            InboundEvent::TextReply { user_id, body } => {
                let _guard = self.store.acquire(&user_id).await;
                if self.store.exists(&user_id) {
                    self.run_turn(&user_id, Some(&body)).await
                } else {
                    self.sender
                        .send(&user_id, &composer::booking_menu(&self.booking_button_id))
                        .await?;
                    Ok(Disposition::Handled)
                }
            }
        }
    }

    /// Booking trigger: initialize if absent, acknowledge, then produce the
    /// first dialogue prompt. Caller holds the user's turn guard.
    async fn start_booking(&self, user_id: &str) -> Result<Disposition, BooklineError> {
        let fresh = !self.store.exists(user_id);
        if fresh {
            self.store.initialize(user_id);
            info!(user_id, "booking dialogue started");
        }

        if let Err(e) = self
            .sender
            .send(user_id, &composer::booking_acknowledgement())
            .await
        {
            if fresh {
                self.store.remove(user_id);
            }
            return Err(e);
        }

        self.run_turn(user_id, None).await
    }

    /// Advances one turn and delivers its message. The advanced state is
    /// only kept if delivery succeeds; otherwise the pre-turn state is
    /// restored so the step does not count as advanced.
    async fn run_turn(
        &self,
        user_id: &str,
        response: Option<&str>,
    ) -> Result<Disposition, BooklineError> {
        let prior = self.store.get(user_id);
        let turn = self.dialogue.advance(user_id, response);

        match self.deliver(user_id, &turn).await {
            Ok(()) => {
                if turn.completed {
                    self.store.remove(user_id);
                    info!(user_id, "booking confirmed, conversation closed");
                }
                Ok(Disposition::Handled)
            }
            Err(e) => {
                match prior {
                    Some(state) => self.store.put(user_id, state),
                    None => self.store.remove(user_id),
                }
                Err(e)
            }
        }
    }

    /// Delivers a turn's message, upgrading a completed confirmation to a
    /// document attachment when one is configured. The upload must succeed
    /// before the document message is composed.
    async fn deliver(&self, user_id: &str, turn: &Turn) -> Result<(), BooklineError> {
        if turn.completed && self.attach_document {
            if let OutboundMessage::TextPrompt { body } = &turn.message {
                let media_id = self.sender.upload_confirmation_document().await?;
                let document = OutboundMessage::MediaDocument {
                    media_id,
                    caption: body.clone(),
                };
                self.sender.send(user_id, &document).await?;
                return Ok(());
            }
        }

        self.sender.send(user_id, &turn.message).await?;
        Ok(())
    }
}
