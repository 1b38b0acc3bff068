//! Mock implementation of [`tgbot_core::TelegramApi`] for integration tests.
//!
//! Records every call so tests can assert on the exact payload sent and on how many times
//! the file encoder ran, without hitting Telegram.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tgbot_core::{EncodedFile, Result, ServerResponse, SetWebhookPayload, TelegramApi};

/// One recorded API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    EncodeFile(PathBuf),
    SetWebhook(SetWebhookPayload),
    DeleteWebhook,
}

/// Mock API that answers every webhook call with a fixed response.
pub struct MockApi {
    response: ServerResponse,
    calls: Mutex<Vec<ApiCall>>,
}

#[allow(dead_code)] // not every test binary uses every helper
impl MockApi {
    pub fn new(response: ServerResponse) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Mock whose webhook calls succeed.
    pub fn ok() -> Arc<Self> {
        Self::new(ServerResponse::success(serde_json::json!(true)))
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn encode_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ApiCall::EncodeFile(_)))
            .count()
    }

    /// Payloads passed to `set_webhook`, in call order.
    pub fn set_webhook_payloads(&self) -> Vec<SetWebhookPayload> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::SetWebhook(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TelegramApi for MockApi {
    async fn encode_file(&self, path: &Path) -> Result<EncodedFile> {
        self.record(ApiCall::EncodeFile(path.to_path_buf()));
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        Ok(EncodedFile::new(name, b"encoded".to_vec()))
    }

    async fn set_webhook(&self, payload: SetWebhookPayload) -> Result<ServerResponse> {
        self.record(ApiCall::SetWebhook(payload));
        Ok(self.response.clone())
    }

    async fn delete_webhook(&self) -> Result<ServerResponse> {
        self.record(ApiCall::DeleteWebhook);
        Ok(self.response.clone())
    }
}
