// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook gateway for the Bookline appointment bot.
//!
//! This crate ties the pieces together: it hosts the axum HTTP server
//! that receives WhatsApp webhook deliveries, validates their signatures,
//! and routes classified events through the [`Dispatcher`] into dialogue
//! turns and outbound sends.

pub mod dispatch;
pub mod handlers;
pub mod server;
pub mod signature;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::{Dispatcher, Disposition};
pub use server::{start_server, GatewayState, ServerConfig};
