//! [`BotContext`]: credentials, paths and polling state, plus entry points for update parsing
//! and webhook management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tgbot_core::{
    BotError, HttpTelegramApi, Result, ServerResponse, TelegramApi, Update, WebhookOptions,
    DEFAULT_API_URL,
};
use tracing::{debug, instrument};

use crate::config::BotConfig;
use crate::credentials::Credentials;
use crate::normalizer;
use crate::webhook::WebhookManager;

/// One bot's identity and runtime configuration.
///
/// Meant to be owned by a single request handler or a single sequential polling loop; setters take
/// `&mut self` and there is no internal locking. Concurrent webhook deliveries each get their own context.
pub struct BotContext {
    credentials: Credentials,
    api: Arc<dyn TelegramApi>,
    upload_path: Option<PathBuf>,
    download_path: Option<PathBuf>,
    commands_path: Option<PathBuf>,
    get_updates_without_database: bool,
    last_update_id: Option<i64>,
    last_command_response: Option<ServerResponse>,
}

impl BotContext {
    /// Creates a context talking to the public Bot API. Fails with a credential error when
    /// `api_key` is empty or has no `:`.
    pub fn new(api_key: impl Into<String>, bot_username: impl Into<String>) -> Result<Self> {
        let credentials = Credentials::new(api_key, bot_username)?;
        let api = Arc::new(HttpTelegramApi::new(credentials.api_key()));
        Ok(Self::with_api(credentials, api))
    }

    /// Creates a context using the given API client.
    pub fn with_api(credentials: Credentials, api: Arc<dyn TelegramApi>) -> Self {
        Self {
            credentials,
            api,
            upload_path: None,
            download_path: None,
            commands_path: None,
            get_updates_without_database: false,
            last_update_id: None,
            last_command_response: None,
        }
    }

    /// Builds the context and its HTTP client from configuration.
    pub fn from_config(config: &BotConfig) -> Result<Self> {
        let credentials = Credentials::new(config.api_key.clone(), config.bot_username.clone())?;
        let api_url = config.telegram_api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        let api = HttpTelegramApi::with_api_url(credentials.api_key(), api_url)
            .timeout(Duration::from_secs(config.timeout_secs))?;

        let mut ctx = Self::with_api(credentials, Arc::new(api));
        ctx.upload_path = config.upload_path.clone();
        ctx.download_path = config.download_path.clone();
        ctx.commands_path = config.commands_path.clone();
        ctx.use_get_updates_without_database(config.get_updates_without_database);
        Ok(ctx)
    }

    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    pub fn bot_username(&self) -> &str {
        self.credentials.bot_username()
    }

    pub fn bot_id(&self) -> &str {
        self.credentials.bot_id()
    }

    /// Parses a webhook delivery or polled update body.
    pub fn parse_update(&self, raw_json: &str) -> Result<Update> {
        normalizer::parse_update(raw_json, self.bot_username())
    }

    pub async fn set_webhook(&self, url: &str, options: WebhookOptions) -> Result<ServerResponse> {
        WebhookManager::new(self.api.as_ref())
            .set_webhook(url, options)
            .await
    }

    pub async fn delete_webhook(&self) -> Result<ServerResponse> {
        WebhookManager::new(self.api.as_ref()).delete_webhook().await
    }

    pub fn set_upload_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.upload_path = Some(path.into());
        self
    }

    pub fn upload_path(&self) -> Option<&Path> {
        self.upload_path.as_deref()
    }

    pub fn set_download_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.download_path = Some(path.into());
        self
    }

    pub fn download_path(&self) -> Option<&Path> {
        self.download_path.as_deref()
    }

    pub fn set_commands_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.commands_path = Some(path.into());
        self
    }

    pub fn commands_path(&self) -> Option<&Path> {
        self.commands_path.as_deref()
    }

    /// Switches polling-without-storage mode. Turning it off forgets the last update id.
    #[instrument(skip(self))]
    pub fn use_get_updates_without_database(&mut self, enable: bool) -> &mut Self {
        self.get_updates_without_database = enable;
        if !enable {
            self.last_update_id = None;
        }
        debug!(enabled = enable, "getUpdates without database");
        self
    }

    pub fn is_get_updates_without_database(&self) -> bool {
        self.get_updates_without_database
    }

    /// Records the last processed update id in memory. Only valid in polling-without-storage mode.
    pub fn set_last_update_id(&mut self, update_id: i64) -> Result<&mut Self> {
        if !self.get_updates_without_database {
            return Err(BotError::State(
                "last update id is only tracked when getUpdates runs without a database".to_string(),
            ));
        }
        self.last_update_id = Some(update_id);
        Ok(self)
    }

    pub fn last_update_id(&self) -> Option<i64> {
        self.last_update_id
    }

    /// Offset for the next `getUpdates` call: one past the last processed update.
    pub fn next_update_offset(&self) -> Option<i64> {
        self.last_update_id.map(|id| id + 1)
    }

    pub fn set_last_command_response(&mut self, response: ServerResponse) -> &mut Self {
        self.last_command_response = Some(response);
        self
    }

    pub fn last_command_response(&self) -> Option<&ServerResponse> {
        self.last_command_response.as_ref()
    }
}

impl fmt::Debug for BotContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotContext")
            .field("credentials", &self.credentials)
            .field("upload_path", &self.upload_path)
            .field("download_path", &self.download_path)
            .field("commands_path", &self.commands_path)
            .field("get_updates_without_database", &self.get_updates_without_database)
            .field("last_update_id", &self.last_update_id)
            .finish_non_exhaustive()
    }
}
