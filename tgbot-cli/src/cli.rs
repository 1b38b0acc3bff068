//! CLI parser and config loading.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tgbot_context::BotConfig;
use tgbot_core::{UpdateType, WebhookOptions};

#[derive(Parser, Debug)]
#[command(name = "tgbot")]
#[command(about = "Telegram bot context CLI: info, parse-update, set-webhook, delete-webhook", long_about = None)]
#[command(version)]
pub struct Cli {
    /// API key (`<bot id>:<token>`); overrides BOT_API_KEY / BOT_TOKEN.
    #[arg(short = 'k', long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show bot id, username and configured paths.
    Info,
    /// Parse an update body from a file (or stdin) and print its id, type and command.
    ParseUpdate {
        /// File with the raw JSON body; stdin when omitted.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Register a webhook URL.
    SetWebhook {
        url: String,
        /// Public key certificate for a self-signed endpoint.
        #[arg(short, long)]
        certificate: Option<PathBuf>,
        #[arg(short, long)]
        max_connections: Option<u32>,
        /// Update types to receive, comma separated (e.g. message,callback_query).
        #[arg(short, long, value_delimiter = ',')]
        allowed_updates: Vec<String>,
        /// Extra options as a JSON object; unrecognized keys are ignored.
        #[arg(long)]
        options: Option<String>,
    },
    /// Remove the registered webhook.
    DeleteWebhook,
}

/// Load BotConfig from environment. If `api_key` is provided it overrides BOT_API_KEY.
pub fn load_config(api_key: Option<String>) -> Result<BotConfig> {
    BotConfig::load(api_key)
}

/// Merges `--options` JSON with the dedicated flags; flags win. Every allowed update name,
/// from either source, must be a known update type.
pub fn build_webhook_options(
    options: Option<&str>,
    certificate: Option<PathBuf>,
    max_connections: Option<u32>,
    allowed_updates: Vec<String>,
) -> Result<WebhookOptions> {
    let mut webhook_options = match options {
        Some(raw) => {
            let value: Value = serde_json::from_str(raw).context("--options is not valid JSON")?;
            let map = value
                .as_object()
                .context("--options must be a JSON object")?;
            WebhookOptions::from_json(map)?
        }
        None => WebhookOptions::default(),
    };

    if let Some(path) = certificate {
        webhook_options = webhook_options.certificate(path);
    }
    if let Some(n) = max_connections {
        webhook_options = webhook_options.max_connections(n);
    }
    if !allowed_updates.is_empty() {
        webhook_options = webhook_options.allowed_updates(allowed_updates);
    }
    for name in webhook_options.allowed_updates.iter().flatten() {
        name.parse::<UpdateType>().map_err(anyhow::Error::msg)?;
    }
    Ok(webhook_options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tgbot_core::Certificate;

    #[test]
    fn test_parse_set_webhook_args() {
        let cli = Cli::parse_from([
            "tgbot",
            "set-webhook",
            "https://example.com/hook",
            "--certificate",
            "/tmp/cert.pem",
            "--allowed-updates",
            "message,callback_query",
        ]);
        match cli.command {
            Commands::SetWebhook {
                url,
                certificate,
                allowed_updates,
                ..
            } => {
                assert_eq!(url, "https://example.com/hook");
                assert_eq!(certificate, Some(PathBuf::from("/tmp/cert.pem")));
                assert_eq!(allowed_updates, vec!["message", "callback_query"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_api_key() {
        let cli = Cli::parse_from(["tgbot", "info", "--api-key", "1:abc"]);
        assert_eq!(cli.api_key.as_deref(), Some("1:abc"));
    }

    #[test]
    fn test_build_webhook_options_flags_override_json() {
        let options = build_webhook_options(
            Some(r#"{"max_connections": 5, "foo": true}"#),
            Some(PathBuf::from("/tmp/c.pem")),
            Some(50),
            vec![],
        )
        .unwrap();
        assert_eq!(options.max_connections, Some(50));
        assert_eq!(
            options.certificate,
            Some(Certificate::Path(PathBuf::from("/tmp/c.pem")))
        );
        assert!(options.allowed_updates.is_none());
    }

    #[test]
    fn test_build_webhook_options_rejects_non_object() {
        assert!(build_webhook_options(Some("[1]"), None, None, vec![]).is_err());
        assert!(build_webhook_options(Some("{"), None, None, vec![]).is_err());
    }

    #[test]
    fn test_build_webhook_options_rejects_unknown_update_type() {
        let err = build_webhook_options(None, None, None, vec!["messages".to_string()]).unwrap_err();
        assert!(err.to_string().contains("messages"));

        let options =
            build_webhook_options(None, None, None, vec!["callback_query".to_string()]).unwrap();
        assert_eq!(options.allowed_updates, Some(vec!["callback_query".to_string()]));
    }

    #[test]
    fn test_build_webhook_options_checks_json_allowed_updates() {
        let err = build_webhook_options(
            Some(r#"{"allowed_updates": ["message", "callback_queries"]}"#),
            None,
            None,
            vec![],
        )
        .unwrap_err();
        assert!(err.to_string().contains("callback_queries"));

        let options = build_webhook_options(
            Some(r#"{"allowed_updates": ["message", "poll"]}"#),
            None,
            None,
            vec![],
        )
        .unwrap();
        assert_eq!(
            options.allowed_updates,
            Some(vec!["message".to_string(), "poll".to_string()])
        );
    }
}
