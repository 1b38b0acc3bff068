//! Telegram Bot API client abstraction.
//!
//! [`TelegramApi`] is the contract the bot context calls into; [`HttpTelegramApi`] implements it over reqwest.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument};

use crate::error::{BotError, Result};
use crate::types::{EncodedFile, ServerResponse, SetWebhookPayload};

/// Default Bot API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Bot API methods used by the bot context. Implementations map to a transport (HTTP, or a recorder in tests).
#[async_trait]
pub trait TelegramApi: Send + Sync {
    /// Reads a local file so it can be sent as a multipart upload.
    async fn encode_file(&self, path: &Path) -> Result<EncodedFile>;
    /// Calls `setWebhook` with the assembled payload.
    async fn set_webhook(&self, payload: SetWebhookPayload) -> Result<ServerResponse>;
    /// Calls `deleteWebhook`.
    async fn delete_webhook(&self) -> Result<ServerResponse>;
}

/// reqwest-based implementation of [`TelegramApi`].
pub struct HttpTelegramApi {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl HttpTelegramApi {
    /// Creates a client for the public Bot API using the given bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    /// Creates a client against a custom API URL (local Bot API server, or a mock server in tests).
    pub fn with_api_url(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Replaces the HTTP client with one that enforces `timeout` per request.
    pub fn timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// Sends the request and decodes the response envelope. The Bot API reports failures as
    /// `ok: false` JSON with a 4xx status, so the status code alone is not treated as an error.
    async fn send(&self, method: &str, request: reqwest::RequestBuilder) -> Result<ServerResponse> {
        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!(method = %method, status = %status, "Bot API responded");

        serde_json::from_str(&body).map_err(|e| {
            BotError::Transport(format!(
                "{} returned an undecodable body (HTTP {}): {}",
                method, status, e
            ))
        })
    }
}

impl fmt::Debug for HttpTelegramApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTelegramApi")
            .field("api_url", &self.api_url)
            .field("token", &"***")
            .finish()
    }
}

#[async_trait]
impl TelegramApi for HttpTelegramApi {
    #[instrument(skip(self))]
    async fn encode_file(&self, path: &Path) -> Result<EncodedFile> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        Ok(EncodedFile::new(file_name, bytes))
    }

    #[instrument(skip(self, payload), fields(url = %payload.url))]
    async fn set_webhook(&self, payload: SetWebhookPayload) -> Result<ServerResponse> {
        let mut form = Form::new();
        for (name, value) in payload.text_fields() {
            form = form.text(name, value);
        }
        if let Some(certificate) = payload.certificate {
            let part = Part::bytes(certificate.bytes).file_name(certificate.file_name);
            form = form.part("certificate", part);
        }

        let request = self.client.post(self.method_url("setWebhook")).multipart(form);
        self.send("setWebhook", request).await
    }

    #[instrument(skip(self))]
    async fn delete_webhook(&self) -> Result<ServerResponse> {
        let request = self.client.post(self.method_url("deleteWebhook"));
        self.send("deleteWebhook", request).await
    }
}
