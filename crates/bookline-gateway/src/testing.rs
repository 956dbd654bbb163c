// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock delivery channel for deterministic dispatcher and handler tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bookline_core::{BooklineError, ChannelSender, MessageId, OutboundMessage};
use tokio::sync::Mutex;

/// A mock [`ChannelSender`] that captures sent messages and can be toggled
/// into failure modes.
pub struct MockSender {
    sent: Mutex<Vec<(String, OutboundMessage)>>,
    fail_sends: AtomicBool,
    fail_uploads: AtomicBool,
    send_delay: Option<Duration>,
}

impl MockSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_sends: AtomicBool::new(false),
            fail_uploads: AtomicBool::new(false),
            send_delay: None,
        }
    }

    /// A sender whose `send` sleeps before capturing, to widen race windows
    /// in concurrency tests.
    pub fn with_send_delay(delay: Duration) -> Self {
        Self {
            send_delay: Some(delay),
            ..Self::new()
        }
    }

    /// All `(recipient, message)` pairs captured so far.
    pub async fn sent(&self) -> Vec<(String, OutboundMessage)> {
        self.sent.lock().await.clone()
    }

    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    /// Clears all failure modes.
    pub fn restore(&self) {
        self.fail_sends.store(false, Ordering::SeqCst);
        self.fail_uploads.store(false, Ordering::SeqCst);
    }
}

impl Default for MockSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelSender for MockSender {
    async fn send(
        &self,
        to: &str,
        message: &OutboundMessage,
    ) -> Result<MessageId, BooklineError> {
        if let Some(delay) = self.send_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(BooklineError::Send {
                message: "mock send failure".into(),
                source: None,
            });
        }
        let mut sent = self.sent.lock().await;
        sent.push((to.to_string(), message.clone()));
        Ok(MessageId(format!("mock-msg-{}", sent.len())))
    }

    async fn upload_confirmation_document(&self) -> Result<String, BooklineError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(BooklineError::Upload {
                message: "mock upload failure".into(),
                source: None,
            });
        }
        Ok("mock-media".to_string())
    }
}
