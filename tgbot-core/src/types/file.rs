//! Local file prepared for a multipart upload.

/// File contents plus the name sent in the multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl EncodedFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}
