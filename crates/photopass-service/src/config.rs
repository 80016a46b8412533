//! Service configuration.
//!
//! Defaults cover everything except the oracle API key. Hosts either start
//! from [`ServiceConfig::from_env`] or parse a JSON document with
//! [`ServiceConfig::from_json`].

use photopass_core::encode::DEFAULT_JPEG_QUALITY;
use photopass_core::sheet::{SHEET_HEIGHT, SHEET_WIDTH};
use photopass_core::transform::{TransformConfig, BASE_OUTPUT_WIDTH};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

pub const ENV_ORACLE_URL: &str = "PHOTOPASS_ORACLE_URL";
pub const ENV_API_KEY: &str = "PHOTOPASS_API_KEY";
pub const ENV_NORMALIZE_MODEL: &str = "PHOTOPASS_NORMALIZE_MODEL";
pub const ENV_SCORE_MODEL: &str = "PHOTOPASS_SCORE_MODEL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "PHOTOPASS_REQUEST_TIMEOUT_SECS";

/// Connection settings for the HTTP oracle.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// API root, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub base_url: String,
    pub api_key: String,
    /// Model used for background normalization (must return images).
    pub normalize_model: String,
    /// Model used for rule scoring (must support JSON output).
    pub score_model: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: String::new(),
            normalize_model: "gemini-2.5-flash-image-preview".to_string(),
            score_model: "gemini-2.5-flash".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
        }
    }
}

impl std::fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("normalize_model", &self.normalize_model)
            .field("score_model", &self.score_model)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Largest accepted photo width or sheet side, in pixels (33 in at 300 DPI).
pub const MAX_OUTPUT_DIMENSION: u32 = 10_000;

/// Rendering settings for generated photos and print sheets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Width of the single photo; height follows the document aspect ratio.
    pub base_width: u32,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    pub sheet_width: u32,
    pub sheet_height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_width: BASE_OUTPUT_WIDTH,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            sheet_width: SHEET_WIDTH,
            sheet_height: SHEET_HEIGHT,
        }
    }
}

impl OutputConfig {
    pub fn transform(&self) -> TransformConfig {
        TransformConfig {
            base_width: self.base_width,
            ..TransformConfig::default()
        }
    }
}

/// Complete service settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub oracle: OracleConfig,
    pub output: OutputConfig,
}

impl ServiceConfig {
    /// Defaults overlaid with the `PHOTOPASS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ServiceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from `lookup` (an environment-like source) and validate.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup(ENV_ORACLE_URL) {
            self.oracle.base_url = url;
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            self.oracle.api_key = key;
        }
        if let Some(model) = lookup(ENV_NORMALIZE_MODEL) {
            self.oracle.normalize_model = model;
        }
        if let Some(model) = lookup(ENV_SCORE_MODEL) {
            self.oracle.score_model = model;
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            self.oracle.request_timeout_secs = raw.trim().parse().map_err(|_| {
                ServiceError::Config(format!("{ENV_REQUEST_TIMEOUT_SECS} must be an integer, got '{raw}'"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| -> Result<()> { Err(ServiceError::Config(msg.to_string())) };

        if self.oracle.base_url.trim().is_empty() {
            return invalid("oracle.base_url must not be empty");
        }
        if self.oracle.normalize_model.is_empty() || self.oracle.score_model.is_empty() {
            return invalid("oracle model names must not be empty");
        }
        if self.oracle.request_timeout_secs == 0 || self.oracle.connect_timeout_secs == 0 {
            return invalid("oracle timeouts must be positive");
        }
        if self.output.base_width == 0 {
            return invalid("output.base_width must be positive");
        }
        if self.output.base_width > MAX_OUTPUT_DIMENSION {
            return invalid("output.base_width exceeds the maximum output dimension");
        }
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return invalid("output.jpeg_quality must be within 1-100");
        }
        if self.output.sheet_width == 0 || self.output.sheet_height == 0 {
            return invalid("output sheet dimensions must be positive");
        }
        if self.output.sheet_width > MAX_OUTPUT_DIMENSION
            || self.output.sheet_height > MAX_OUTPUT_DIMENSION
        {
            return invalid("output sheet dimensions exceed the maximum output dimension");
        }
        Ok(())
    }
}
