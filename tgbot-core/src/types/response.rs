//! Bot API response envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope every Bot API method returns: `ok` plus either `result` or `error_code`/`description`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extra error details such as `retry_after` or `migrate_to_chat_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

impl ServerResponse {
    /// Successful response carrying `result`.
    pub fn success(result: Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error_code: None,
            description: None,
            parameters: None,
        }
    }

    /// Rejected response with the given code and description.
    pub fn failure(error_code: i64, description: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error_code: Some(error_code),
            description: Some(description.into()),
            parameters: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Remote error code; 0 when the API did not send one.
    pub fn error_code(&self) -> i64 {
        self.error_code.unwrap_or_default()
    }

    /// Remote description; empty when the API did not send one.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }
}
