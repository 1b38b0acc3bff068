//! Error types for the bot context core.
//!
//! [`BotError`] is the top-level error; the narrower enums describe one failure family each
//! so callers can match on credential, payload, update-shape and webhook failures separately.

use std::fmt;

use thiserror::Error;

use crate::types::UpdateType;

/// Top-level error for tgbot (credentials, payloads, webhook, transport, IO).
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Payload decode error: {0}")]
    PayloadDecode(#[from] PayloadDecodeError),

    #[error("Update shape error: {0}")]
    UpdateShape(#[from] UpdateShapeError),

    #[error(transparent)]
    Webhook(#[from] WebhookError),

    #[error("Invalid option `{key}`: {reason}")]
    InvalidOption { key: String, reason: String },

    #[error("State error: {0}")]
    State(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed bot API key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("API key is empty")]
    Empty,

    #[error("API key has no ':' separator between bot id and token")]
    MissingSeparator,
}

/// Raw update body could not be decoded into a JSON object.
#[derive(Error, Debug)]
pub enum PayloadDecodeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Decoded JSON object does not look like a Telegram update.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateShapeError {
    #[error("missing update_id")]
    MissingUpdateId,

    #[error("update_id is not an integer")]
    InvalidUpdateId,

    #[error("no known update type in payload")]
    UnknownUpdateType,

    #[error("`{0}` is not a JSON object")]
    InvalidEntity(UpdateType),
}

/// Which webhook call was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOperation {
    Set,
    Delete,
}

impl fmt::Display for WebhookOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookOperation::Set => f.write_str("set"),
            WebhookOperation::Delete => f.write_str("deleted"),
        }
    }
}

/// The Bot API answered a setWebhook/deleteWebhook call with `ok: false`.
/// Error code and description are carried verbatim from the response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Webhook was not {operation}! Error: {error_code} {description}")]
pub struct WebhookError {
    pub operation: WebhookOperation,
    pub error_code: i64,
    pub description: String,
}

/// The request URL embeds the bot token, so it is stripped before the message is kept.
impl From<reqwest::Error> for BotError {
    fn from(e: reqwest::Error) -> Self {
        BotError::Transport(e.without_url().to_string())
    }
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
