// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the WhatsApp Cloud API.
//!
//! Provides [`CloudApiClient`], which handles message sends and media
//! uploads against the Graph API with bearer authentication. Implements
//! [`ChannelSender`] so the dispatcher stays transport-agnostic.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use bookline_core::{BooklineError, ChannelSender, MessageId, OutboundMessage};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;

use crate::payload;

/// Base URL for the Graph API.
const API_BASE_URL: &str = "https://graph.facebook.com";

/// MIME type of the confirmation document.
const DOCUMENT_MIME: &str = "application/pdf";

/// The configured confirmation document to upload per completed booking.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    /// Local path read at upload time.
    pub path: PathBuf,
    /// Filename shown to the recipient.
    pub filename: String,
}

/// HTTP client for Cloud API communication.
#[derive(Debug, Clone)]
pub struct CloudApiClient {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
    phone_number_id: String,
    document: Option<DocumentSource>,
}

impl CloudApiClient {
    /// Creates a new Cloud API client.
    ///
    /// # Arguments
    /// * `access_token` - Graph API bearer token
    /// * `api_version` - API version path segment (e.g. `v18.0`)
    /// * `phone_number_id` - business phone number identifier
    /// * `document` - optional confirmation document source
    pub fn new(
        access_token: &str,
        api_version: String,
        phone_number_id: String,
        document: Option<DocumentSource>,
    ) -> Result<Self, BooklineError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {access_token}");
        headers.insert(
            "authorization",
            HeaderValue::from_str(&bearer).map_err(|e| {
                BooklineError::Config(format!("invalid access token header value: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| BooklineError::Send {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
            api_version,
            phone_number_id,
            document,
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/{}/messages",
            self.base_url, self.api_version, self.phone_number_id
        )
    }

    fn media_url(&self) -> String {
        format!(
            "{}/{}/{}/media",
            self.base_url, self.api_version, self.phone_number_id
        )
    }

    /// Sends a rendered message body and returns the provider message id.
    async fn post_message(&self, body: Value) -> Result<MessageId, BooklineError> {
        let response = self
            .client
            .post(self.messages_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| BooklineError::Send {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "message send response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BooklineError::Send {
                message: format!("API returned {status}: {body}"),
                source: None,
            });
        }

        let body: Value = response.json().await.map_err(|e| BooklineError::Send {
            message: format!("failed to parse send response: {e}"),
            source: Some(Box::new(e)),
        })?;

        body.get("messages")
            .and_then(Value::as_array)
            .and_then(|messages| messages.first())
            .and_then(|message| message.get("id"))
            .and_then(Value::as_str)
            .map(|id| MessageId(id.to_string()))
            .ok_or_else(|| BooklineError::Send {
                message: "send response missing message id".into(),
                source: None,
            })
    }

    /// Uploads raw bytes as media and returns the media identifier.
    pub async fn upload_media(
        &self,
        bytes: Vec<u8>,
        filename: String,
        mime: &str,
    ) -> Result<String, BooklineError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str(mime)
            .map_err(|e| BooklineError::Upload {
                message: format!("invalid media MIME type: {e}"),
                source: Some(Box::new(e)),
            })?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("messaging_product", "whatsapp");

        let response = self
            .client
            .post(self.media_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| BooklineError::Upload {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "media upload response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BooklineError::Upload {
                message: format!("API returned {status}: {body}"),
                source: None,
            });
        }

        let body: Value = response.json().await.map_err(|e| BooklineError::Upload {
            message: format!("failed to parse upload response: {e}"),
            source: Some(Box::new(e)),
        })?;

        body.get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| BooklineError::Upload {
                message: "upload response missing media id".into(),
                source: None,
            })
    }
}

#[async_trait]
impl ChannelSender for CloudApiClient {
    async fn send(
        &self,
        to: &str,
        message: &OutboundMessage,
    ) -> Result<MessageId, BooklineError> {
        self.post_message(payload::render(to, message)).await
    }

    async fn upload_confirmation_document(&self) -> Result<String, BooklineError> {
        let document = self.document.as_ref().ok_or_else(|| BooklineError::Upload {
            message: "no confirmation document configured".into(),
            source: None,
        })?;

        let bytes = tokio::fs::read(&document.path)
            .await
            .map_err(|e| BooklineError::Upload {
                message: format!(
                    "failed to read confirmation document {}: {e}",
                    document.path.display()
                ),
                source: Some(Box::new(e)),
            })?;

        self.upload_media(bytes, document.filename.clone(), DOCUMENT_MIME)
            .await
    }
}
