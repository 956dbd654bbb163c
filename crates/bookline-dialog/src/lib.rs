// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation core for the Bookline appointment bot.
//!
//! Three pieces, all free of network I/O:
//! - [`ConversationStore`]: in-memory per-user state with turn locks
//! - the dialogue state machine ([`Dialogue`], [`advance_state`]): a
//!   table-driven four-step booking script
//! - [`composer`]: pure builders for every outbound message
//!
//! The webhook dispatcher in `bookline-gateway` is the only consumer that
//! wires these together with an actual delivery channel.

pub mod composer;
pub mod machine;
pub mod store;

pub use machine::{advance_state, Dialogue, Turn, TERMINAL_STEP};
pub use store::ConversationStore;
