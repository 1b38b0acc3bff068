//! Update entity: one inbound event, kept as the decoded JSON object and scoped to a bot username.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::UpdateShapeError;

/// Update type, named after the field that carries it in the Bot API payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateType {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    BusinessConnection,
    BusinessMessage,
    EditedBusinessMessage,
    DeletedBusinessMessages,
    MessageReaction,
    MessageReactionCount,
    InlineQuery,
    ChosenInlineResult,
    CallbackQuery,
    ShippingQuery,
    PreCheckoutQuery,
    PurchasedPaidMedia,
    Poll,
    PollAnswer,
    MyChatMember,
    ChatMember,
    ChatJoinRequest,
    ChatBoost,
    RemovedChatBoost,
}

impl UpdateType {
    /// All known types, in the order they are probed when classifying a payload.
    pub const ALL: [UpdateType; 23] = [
        UpdateType::Message,
        UpdateType::EditedMessage,
        UpdateType::ChannelPost,
        UpdateType::EditedChannelPost,
        UpdateType::BusinessConnection,
        UpdateType::BusinessMessage,
        UpdateType::EditedBusinessMessage,
        UpdateType::DeletedBusinessMessages,
        UpdateType::MessageReaction,
        UpdateType::MessageReactionCount,
        UpdateType::InlineQuery,
        UpdateType::ChosenInlineResult,
        UpdateType::CallbackQuery,
        UpdateType::ShippingQuery,
        UpdateType::PreCheckoutQuery,
        UpdateType::PurchasedPaidMedia,
        UpdateType::Poll,
        UpdateType::PollAnswer,
        UpdateType::MyChatMember,
        UpdateType::ChatMember,
        UpdateType::ChatJoinRequest,
        UpdateType::ChatBoost,
        UpdateType::RemovedChatBoost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::Message => "message",
            UpdateType::EditedMessage => "edited_message",
            UpdateType::ChannelPost => "channel_post",
            UpdateType::EditedChannelPost => "edited_channel_post",
            UpdateType::BusinessConnection => "business_connection",
            UpdateType::BusinessMessage => "business_message",
            UpdateType::EditedBusinessMessage => "edited_business_message",
            UpdateType::DeletedBusinessMessages => "deleted_business_messages",
            UpdateType::MessageReaction => "message_reaction",
            UpdateType::MessageReactionCount => "message_reaction_count",
            UpdateType::InlineQuery => "inline_query",
            UpdateType::ChosenInlineResult => "chosen_inline_result",
            UpdateType::CallbackQuery => "callback_query",
            UpdateType::ShippingQuery => "shipping_query",
            UpdateType::PreCheckoutQuery => "pre_checkout_query",
            UpdateType::PurchasedPaidMedia => "purchased_paid_media",
            UpdateType::Poll => "poll",
            UpdateType::PollAnswer => "poll_answer",
            UpdateType::MyChatMember => "my_chat_member",
            UpdateType::ChatMember => "chat_member",
            UpdateType::ChatJoinRequest => "chat_join_request",
            UpdateType::ChatBoost => "chat_boost",
            UpdateType::RemovedChatBoost => "removed_chat_boost",
        }
    }

    /// Types whose entity is a Message object (and may therefore carry a command).
    pub fn is_message_like(&self) -> bool {
        matches!(
            self,
            UpdateType::Message
                | UpdateType::EditedMessage
                | UpdateType::ChannelPost
                | UpdateType::EditedChannelPost
                | UpdateType::BusinessMessage
                | UpdateType::EditedBusinessMessage
        )
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UpdateType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown update type: {}", s))
    }
}

/// One inbound update. The payload is kept as decoded; only `update_id` and the update type are
/// validated. Field-level parsing is left to [`Update::to_teloxide`] or to downstream consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    update_id: i64,
    update_type: UpdateType,
    bot_username: String,
    payload: Map<String, Value>,
}

impl Update {
    /// Builds an update from a decoded payload, scoped to `bot_username` (may be empty).
    pub fn new(
        payload: Map<String, Value>,
        bot_username: impl Into<String>,
    ) -> Result<Self, UpdateShapeError> {
        let update_id = payload
            .get("update_id")
            .ok_or(UpdateShapeError::MissingUpdateId)?
            .as_i64()
            .ok_or(UpdateShapeError::InvalidUpdateId)?;

        let update_type = UpdateType::ALL
            .iter()
            .copied()
            .find(|t| payload.contains_key(t.as_str()))
            .ok_or(UpdateShapeError::UnknownUpdateType)?;

        if !payload
            .get(update_type.as_str())
            .is_some_and(Value::is_object)
        {
            return Err(UpdateShapeError::InvalidEntity(update_type));
        }

        Ok(Self {
            update_id,
            update_type,
            bot_username: bot_username.into(),
            payload,
        })
    }

    pub fn update_id(&self) -> i64 {
        self.update_id
    }

    pub fn update_type(&self) -> UpdateType {
        self.update_type
    }

    pub fn bot_username(&self) -> &str {
        &self.bot_username
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// The object stored under the update type key (the Message, CallbackQuery, ...).
    pub fn entity(&self) -> Option<&Map<String, Value>> {
        self.payload
            .get(self.update_type.as_str())
            .and_then(Value::as_object)
    }

    /// Command addressed to this bot, without the leading `/` and `@username` suffix.
    ///
    /// `/start@OtherBot` yields `None` when the update is scoped to a different username.
    pub fn command(&self) -> Option<&str> {
        if !self.update_type.is_message_like() {
            return None;
        }
        let text = self.entity()?.get("text")?.as_str()?;
        let token = text.strip_prefix('/')?.split_whitespace().next()?;

        let name = match token.split_once('@') {
            Some((name, target)) => {
                if !self.bot_username.is_empty()
                    && !target.eq_ignore_ascii_case(&self.bot_username)
                {
                    return None;
                }
                name
            }
            None => token,
        };

        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Converts into teloxide's typed update for handing to a teloxide-based dispatcher.
    pub fn to_teloxide(&self) -> Result<teloxide::types::Update, serde_json::Error> {
        serde_json::from_value(Value::Object(self.payload.clone()))
    }
}
