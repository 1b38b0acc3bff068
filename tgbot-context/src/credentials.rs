//! Bot credentials: API key, derived bot id, optional username.

use std::fmt;

use tgbot_core::CredentialError;

/// API key as issued by BotFather (`<bot id>:<token>`) plus the bot's username.
///
/// `bot_id` is derived from the key once and has no setter.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    bot_id: String,
    bot_username: String,
}

impl Credentials {
    /// Splits `api_key` on the first `:`; the part before it is the bot id.
    /// No other format checks are made.
    pub fn new(
        api_key: impl Into<String>,
        bot_username: impl Into<String>,
    ) -> Result<Self, CredentialError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(CredentialError::Empty);
        }
        let (bot_id, _token) = api_key
            .split_once(':')
            .ok_or(CredentialError::MissingSeparator)?;
        let bot_id = bot_id.to_string();

        Ok(Self {
            api_key,
            bot_id,
            bot_username: bot_username.into(),
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn bot_id(&self) -> &str {
        &self.bot_id
    }

    pub fn bot_username(&self) -> &str {
        &self.bot_username
    }

    /// Key with the token replaced by `***`, for logs.
    pub fn masked_api_key(&self) -> String {
        format!("{}:***", self.bot_id)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.masked_api_key())
            .field("bot_id", &self.bot_id)
            .field("bot_username", &self.bot_username)
            .finish()
    }
}
