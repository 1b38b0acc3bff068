//! Core types: server response, encoded file, update entity, webhook options and payload.

pub mod file;
pub mod response;
pub mod update;
pub mod webhook;

pub use file::EncodedFile;
pub use response::ServerResponse;
pub use update::{Update, UpdateType};
pub use webhook::{Certificate, SetWebhookPayload, WebhookOptions};
