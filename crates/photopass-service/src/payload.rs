//! Inline image payloads.
//!
//! Binary images cross text boundaries (JSON bodies, browser data URLs) as
//! base64 plus a MIME type. [`InlineImage`] serializes to the
//! `{"mimeType": ..., "data": <base64>}` object used by the oracle wire format.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use photopass_core::encode::EncodedImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MIME type assumed when a data URL omits one.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("invalid base64 data: {0}")]
    InvalidBase64(String),

    #[error("invalid data URL: {0}")]
    InvalidDataUrl(&'static str),
}

/// An encoded image together with its MIME type.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    pub mime_type: String,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl InlineImage {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Build from base64 text.
    pub fn from_base64(mime_type: impl Into<String>, encoded: &str) -> Result<Self, PayloadError> {
        let data = STANDARD
            .decode(encoded.trim())
            .map_err(|e| PayloadError::InvalidBase64(e.to_string()))?;
        Ok(Self::new(mime_type, data))
    }

    /// Parse a `data:<mime>;base64,<data>` URL.
    pub fn from_data_url(url: &str) -> Result<Self, PayloadError> {
        let rest = url
            .trim()
            .strip_prefix("data:")
            .ok_or(PayloadError::InvalidDataUrl("missing 'data:' scheme"))?;
        let (header, encoded) = rest
            .split_once(',')
            .ok_or(PayloadError::InvalidDataUrl("missing ',' separator"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(PayloadError::InvalidDataUrl("only base64 data URLs are supported"))?;
        let mime_type = if mime_type.is_empty() {
            DEFAULT_MIME_TYPE
        } else {
            mime_type
        };
        Self::from_base64(mime_type, encoded)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<EncodedImage> for InlineImage {
    fn from(encoded: EncodedImage) -> Self {
        Self::new(encoded.mime_type, encoded.bytes)
    }
}

// Image bytes never end up in logs.
impl std::fmt::Debug for InlineImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InlineImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text.trim()).map_err(serde::de::Error::custom)
    }
}
