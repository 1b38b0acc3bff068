//! Webhook lifecycle: shapes setWebhook/deleteWebhook requests and turns `ok: false` into [`WebhookError`].

use tgbot_core::{
    Certificate, Result, ServerResponse, SetWebhookPayload, TelegramApi, WebhookError,
    WebhookOperation, WebhookOptions,
};
use tracing::{debug, instrument};

/// Issues webhook calls through a [`TelegramApi`]. No retries; every call goes out exactly once.
pub struct WebhookManager<'a> {
    api: &'a dyn TelegramApi,
}

impl<'a> WebhookManager<'a> {
    pub fn new(api: &'a dyn TelegramApi) -> Self {
        Self { api }
    }

    /// Registers `url` as the webhook. A certificate given as a path is encoded through the API client
    /// first; an empty path counts as no certificate.
    #[instrument(skip(self, options))]
    pub async fn set_webhook(&self, url: &str, options: WebhookOptions) -> Result<ServerResponse> {
        let certificate = match options.certificate {
            Some(Certificate::Path(path)) if path.as_os_str().is_empty() => None,
            Some(Certificate::Path(path)) => Some(self.api.encode_file(&path).await?),
            Some(Certificate::Encoded(file)) => Some(file),
            None => None,
        };

        let payload = SetWebhookPayload {
            url: url.to_string(),
            certificate,
            max_connections: options.max_connections,
            allowed_updates: options.allowed_updates,
        };
        debug!(fields = ?payload.field_names(), "Sending setWebhook");

        let response = self.api.set_webhook(payload).await?;
        ensure_ok(response, WebhookOperation::Set)
    }

    /// Removes any registered webhook.
    #[instrument(skip(self))]
    pub async fn delete_webhook(&self) -> Result<ServerResponse> {
        let response = self.api.delete_webhook().await?;
        ensure_ok(response, WebhookOperation::Delete)
    }
}

fn ensure_ok(response: ServerResponse, operation: WebhookOperation) -> Result<ServerResponse> {
    if response.is_ok() {
        return Ok(response);
    }
    Err(WebhookError {
        operation,
        error_code: response.error_code(),
        description: response.description().to_string(),
    }
    .into())
}
