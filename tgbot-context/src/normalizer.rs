//! Raw webhook/polling body → [`Update`].

use serde_json::{Map, Value};
use tgbot_core::{PayloadDecodeError, Result, Update};

/// Strictly decodes `raw_json` and builds an [`Update`] scoped to `bot_username`.
///
/// Decoding failures are [`PayloadDecodeError`]; a decoded object that is not an update shape
/// surfaces the entity's own [`tgbot_core::UpdateShapeError`].
pub fn parse_update(raw_json: &str, bot_username: &str) -> Result<Update> {
    let payload = decode_payload(raw_json)?;
    Ok(Update::new(payload, bot_username)?)
}

/// Decodes a JSON object. Anything else, including `null` and empty input, is an error.
pub fn decode_payload(raw_json: &str) -> std::result::Result<Map<String, Value>, PayloadDecodeError> {
    match serde_json::from_str::<Value>(raw_json).map_err(PayloadDecodeError::InvalidJson)? {
        Value::Object(map) => Ok(map),
        other => Err(PayloadDecodeError::NotAnObject(json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
