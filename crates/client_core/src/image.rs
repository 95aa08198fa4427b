//! Turns an uploaded image into a data URI that can ride inside the JSON body.

use std::path::Path;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    data_uri: String,
    mime_type: String,
    byte_len: usize,
    file_name: Option<String>,
}

impl EncodedImage {
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        let mime_type = if mime_type.trim().is_empty() {
            FALLBACK_MIME.to_string()
        } else {
            mime_type.trim().to_string()
        };
        Self {
            data_uri: format!("data:{mime_type};base64,{}", STANDARD.encode(bytes)),
            mime_type,
            byte_len: bytes.len(),
            file_name: None,
        }
    }

    /// Encodes bytes already read from `path`, guessing the mime type from its
    /// extension and keeping its file name.
    pub fn from_file_bytes(path: &Path, bytes: &[u8]) -> Self {
        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(FALLBACK_MIME);
        let image = Self::from_bytes(bytes, mime_type);
        match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => image.with_file_name(name),
            None => image,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }
}

/// Reads `path` and encodes it, guessing the mime type from the extension.
pub async fn encode_image_file(path: &Path) -> Result<EncodedImage> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image '{}'", path.display()))?;
    let image = EncodedImage::from_file_bytes(path, &bytes);
    tracing::debug!(
        path = %path.display(),
        mime_type = image.mime_type(),
        bytes = image.byte_len(),
        "encoded image"
    );
    Ok(image)
}
