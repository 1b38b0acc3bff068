//! # tgbot-cli
//!
//! Argument parsing and config loading for the `tgbot` binary.

pub mod cli;

pub use cli::{build_webhook_options, load_config, Cli, Commands};
pub use tgbot_context::BotConfig;
