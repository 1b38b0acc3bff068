//! Bot configuration loaded from environment variables.
//!
//! BOT_API_KEY (or BOT_TOKEN) is required; everything else is optional.

use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Default per-request timeout for Bot API calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything needed to build a [`crate::BotContext`]. Base paths are injected here rather than
/// taken from process-wide constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub api_key: String,
    pub bot_username: String,
    pub upload_path: Option<PathBuf>,
    pub download_path: Option<PathBuf>,
    pub commands_path: Option<PathBuf>,
    /// Optional Bot API base URL (local Bot API server, or a mock server in tests).
    /// Env: `TELEGRAM_API_URL` or `TELOXIDE_API_URL`.
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
    pub get_updates_without_database: bool,
    pub timeout_secs: u64,
}

impl BotConfig {
    /// Loads from env. `api_key` overrides BOT_API_KEY / BOT_TOKEN when given.
    pub fn load(api_key: Option<String>) -> Result<Self> {
        let api_key = match api_key {
            Some(key) => key,
            None => env::var("BOT_API_KEY")
                .or_else(|_| env::var("BOT_TOKEN"))
                .map_err(|_| anyhow::anyhow!("BOT_API_KEY (or BOT_TOKEN) not set"))?,
        };
        let bot_username = env::var("BOT_USERNAME").unwrap_or_default();
        let upload_path = env::var("UPLOAD_PATH").ok().map(PathBuf::from);
        let download_path = env::var("DOWNLOAD_PATH").ok().map(PathBuf::from);
        let commands_path = env::var("COMMANDS_PATH").ok().map(PathBuf::from);
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").ok();
        let get_updates_without_database = env::var("GET_UPDATES_WITHOUT_DATABASE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(false);
        let timeout_secs = env::var("TELEGRAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            bot_username,
            upload_path,
            download_path,
            commands_path,
            telegram_api_url,
            log_file,
            get_updates_without_database,
            timeout_secs,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Uses the given key; everything else at defaults.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            bot_username: String::new(),
            upload_path: None,
            download_path: None,
            commands_path: None,
            telegram_api_url: None,
            log_file: None,
            get_updates_without_database: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 11] = [
        "BOT_API_KEY",
        "BOT_TOKEN",
        "BOT_USERNAME",
        "UPLOAD_PATH",
        "DOWNLOAD_PATH",
        "COMMANDS_PATH",
        "TELEGRAM_API_URL",
        "TELOXIDE_API_URL",
        "LOG_FILE",
        "GET_UPDATES_WITHOUT_DATABASE",
        "TELEGRAM_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_with_api_key() {
        let config = BotConfig::with_api_key("1:abc");
        assert_eq!(config.api_key, "1:abc");
        assert!(config.bot_username.is_empty());
        assert!(config.telegram_api_url.is_none());
        assert!(!config.get_updates_without_database);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    #[serial]
    fn test_load_with_defaults() {
        clear_env();
        env::set_var("BOT_API_KEY", "123:token");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.api_key, "123:token");
        assert_eq!(config.bot_username, "");
        assert!(config.upload_path.is_none());
        assert!(config.download_path.is_none());
        assert!(config.commands_path.is_none());
        assert!(config.telegram_api_url.is_none());
        assert!(config.log_file.is_none());
        assert!(!config.get_updates_without_database);
        assert_eq!(config.timeout_secs, 30);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_with_custom_values() {
        clear_env();
        env::set_var("BOT_TOKEN", "9:fallback");
        env::set_var("BOT_USERNAME", "my_bot");
        env::set_var("UPLOAD_PATH", "/tmp/up");
        env::set_var("DOWNLOAD_PATH", "/tmp/down");
        env::set_var("COMMANDS_PATH", "/srv/commands");
        env::set_var("TELOXIDE_API_URL", "http://localhost:8081");
        env::set_var("LOG_FILE", "logs/bot.log");
        env::set_var("GET_UPDATES_WITHOUT_DATABASE", "true");
        env::set_var("TELEGRAM_TIMEOUT_SECS", "5");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.api_key, "9:fallback");
        assert_eq!(config.bot_username, "my_bot");
        assert_eq!(config.upload_path, Some(PathBuf::from("/tmp/up")));
        assert_eq!(config.download_path, Some(PathBuf::from("/tmp/down")));
        assert_eq!(config.commands_path, Some(PathBuf::from("/srv/commands")));
        assert_eq!(config.telegram_api_url.as_deref(), Some("http://localhost:8081"));
        assert_eq!(config.log_file.as_deref(), Some("logs/bot.log"));
        assert!(config.get_updates_without_database);
        assert_eq!(config.timeout_secs, 5);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_override_and_missing_key() {
        clear_env();
        assert!(BotConfig::load(None).is_err());

        let config = BotConfig::load(Some("7:cli".to_string())).unwrap();
        assert_eq!(config.api_key, "7:cli");
    }
}
