//! # tgbot-context
//!
//! Bot context for a Telegram bot: [`Credentials`] (API key and derived bot id), update parsing,
//! webhook set/delete through [`tgbot_core::TelegramApi`], and configuration. Holds no business logic;
//! parsed updates are handed to downstream dispatch.

pub mod config;
pub mod context;
pub mod credentials;
pub mod normalizer;
pub mod webhook;

pub use config::BotConfig;
pub use context::BotContext;
pub use credentials::Credentials;
pub use normalizer::parse_update;
pub use webhook::WebhookManager;
