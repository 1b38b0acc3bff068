//! # tgbot-core
//!
//! Core types for the Telegram bot context: [`Update`], [`ServerResponse`], webhook options and payload,
//! the [`TelegramApi`] client contract with its HTTP implementation, the error taxonomy, casing helpers
//! and tracing initialization. Used by tgbot-context and tgbot-cli.

pub mod api;
pub mod casing;
pub mod error;
pub mod logger;
pub mod types;

pub use api::{HttpTelegramApi, TelegramApi, DEFAULT_API_URL};
pub use casing::{capitalize_first, command_class_name, title_case};
pub use error::{
    BotError, CredentialError, PayloadDecodeError, Result, UpdateShapeError, WebhookError,
    WebhookOperation,
};
pub use logger::init_tracing;
pub use types::{
    Certificate, EncodedFile, ServerResponse, SetWebhookPayload, Update, UpdateType,
    WebhookOptions,
};
