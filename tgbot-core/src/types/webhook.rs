//! Webhook options accepted from callers and the payload sent to `setWebhook`.

use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{BotError, Result};
use crate::types::EncodedFile;

/// Public key certificate for a self-signed webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Certificate {
    /// Local file; encoded through the API client before sending.
    Path(PathBuf),
    /// Already encoded; sent as is.
    Encoded(EncodedFile),
}

impl From<PathBuf> for Certificate {
    fn from(path: PathBuf) -> Self {
        Certificate::Path(path)
    }
}

impl From<&str> for Certificate {
    fn from(path: &str) -> Self {
        Certificate::Path(PathBuf::from(path))
    }
}

impl From<EncodedFile> for Certificate {
    fn from(file: EncodedFile) -> Self {
        Certificate::Encoded(file)
    }
}

/// Optional `setWebhook` parameters. Only these three are ever forwarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookOptions {
    pub certificate: Option<Certificate>,
    pub max_connections: Option<u32>,
    pub allowed_updates: Option<Vec<String>>,
}

impl WebhookOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn certificate(mut self, certificate: impl Into<Certificate>) -> Self {
        self.certificate = Some(certificate.into());
        self
    }

    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = Some(max_connections);
        self
    }

    pub fn allowed_updates<I, S>(mut self, allowed_updates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_updates = Some(allowed_updates.into_iter().map(Into::into).collect());
        self
    }

    /// Builds options from a loose JSON map. Unrecognized keys are dropped without error;
    /// a recognized key holding the wrong JSON type is rejected. `null` counts as absent.
    pub fn from_json(map: &Map<String, Value>) -> Result<Self> {
        let mut options = Self::default();

        for (key, value) in map {
            if value.is_null() {
                continue;
            }
            match key.as_str() {
                "certificate" => {
                    let path = value
                        .as_str()
                        .ok_or_else(|| invalid_option(key, "expected a file path string"))?;
                    options.certificate = Some(Certificate::from(path));
                }
                "max_connections" => {
                    let n = value
                        .as_u64()
                        .and_then(|n| u32::try_from(n).ok())
                        .ok_or_else(|| invalid_option(key, "expected a non-negative integer"))?;
                    options.max_connections = Some(n);
                }
                "allowed_updates" => {
                    let names = value
                        .as_array()
                        .and_then(|items| {
                            items
                                .iter()
                                .map(|v| v.as_str().map(str::to_string))
                                .collect::<Option<Vec<_>>>()
                        })
                        .ok_or_else(|| invalid_option(key, "expected an array of strings"))?;
                    options.allowed_updates = Some(names);
                }
                other => {
                    debug!(key = %other, "Dropping unrecognized webhook option");
                }
            }
        }

        Ok(options)
    }
}

fn invalid_option(key: &str, reason: &str) -> BotError {
    BotError::InvalidOption {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Request body for `setWebhook`, certificate already encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetWebhookPayload {
    pub url: String,
    pub certificate: Option<EncodedFile>,
    pub max_connections: Option<u32>,
    pub allowed_updates: Option<Vec<String>>,
}

impl SetWebhookPayload {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            certificate: None,
            max_connections: None,
            allowed_updates: None,
        }
    }

    /// Names of the parameters that will be sent.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = vec!["url"];
        if self.certificate.is_some() {
            names.push("certificate");
        }
        if self.max_connections.is_some() {
            names.push("max_connections");
        }
        if self.allowed_updates.is_some() {
            names.push("allowed_updates");
        }
        names
    }

    /// Non-file parameters as form text values. `allowed_updates` is JSON-serialized as the Bot API expects.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("url", self.url.clone())];
        if let Some(n) = self.max_connections {
            fields.push(("max_connections", n.to_string()));
        }
        if let Some(updates) = &self.allowed_updates {
            fields.push(("allowed_updates", Value::from(updates.clone()).to_string()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test options must be an object"),
        }
    }

    #[test]
    fn test_from_json_keeps_recognized_keys() {
        let options = WebhookOptions::from_json(&map(json!({
            "certificate": "/path/to/cert.pem",
            "max_connections": 40,
            "allowed_updates": ["message", "callback_query"]
        })))
        .unwrap();

        assert_eq!(options.certificate, Some(Certificate::from("/path/to/cert.pem")));
        assert_eq!(options.max_connections, Some(40));
        assert_eq!(
            options.allowed_updates,
            Some(vec!["message".to_string(), "callback_query".to_string()])
        );
    }

    #[test]
    fn test_from_json_drops_unknown_keys() {
        let options = WebhookOptions::from_json(&map(json!({
            "foo": 1,
            "secret_token": "abc"
        })))
        .unwrap();
        assert_eq!(options, WebhookOptions::default());
    }

    #[test]
    fn test_from_json_rejects_wrong_type() {
        let err = WebhookOptions::from_json(&map(json!({"max_connections": "many"}))).unwrap_err();
        assert!(matches!(err, BotError::InvalidOption { ref key, .. } if key == "max_connections"));

        let err = WebhookOptions::from_json(&map(json!({"allowed_updates": [1, 2]}))).unwrap_err();
        assert!(matches!(err, BotError::InvalidOption { ref key, .. } if key == "allowed_updates"));
    }

    #[test]
    fn test_from_json_null_is_absent() {
        let options = WebhookOptions::from_json(&map(json!({"certificate": null}))).unwrap();
        assert!(options.certificate.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let options = WebhookOptions::new()
            .certificate("/tmp/cert.pem")
            .max_connections(10)
            .allowed_updates(["message"]);
        assert!(matches!(options.certificate, Some(Certificate::Path(_))));
        assert_eq!(options.max_connections, Some(10));
        assert_eq!(options.allowed_updates, Some(vec!["message".to_string()]));
    }

    #[test]
    fn test_payload_field_names() {
        let mut payload = SetWebhookPayload::new("https://x/y");
        assert_eq!(payload.field_names(), vec!["url"]);

        payload.certificate = Some(EncodedFile::new("cert.pem", b"PEM".to_vec()));
        payload.allowed_updates = Some(vec!["message".to_string()]);
        assert_eq!(
            payload.field_names(),
            vec!["url", "certificate", "allowed_updates"]
        );
    }

    #[test]
    fn test_payload_text_fields_serialize_allowed_updates() {
        let mut payload = SetWebhookPayload::new("https://x/y");
        payload.max_connections = Some(5);
        payload.allowed_updates = Some(vec!["message".to_string(), "poll".to_string()]);

        let fields = payload.text_fields();
        assert_eq!(
            fields,
            vec![
                ("url", "https://x/y".to_string()),
                ("max_connections", "5".to_string()),
                ("allowed_updates", r#"["message","poll"]"#.to_string()),
            ]
        );
    }
}
