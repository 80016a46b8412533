//! `generateContent` HTTP transport.
//!
//! Each request carries one inline image part and one text part. Normalize
//! asks for an image response modality; score asks for JSON constrained to
//! an array of `{requirement, pass, reason}` objects.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use super::{Oracle, OracleError};
use crate::config::OracleConfig;
use crate::payload::InlineImage;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Oracle backed by a `generateContent` REST endpoint.
pub struct HttpOracle {
    client: reqwest::Client,
    config: OracleConfig,
}

impl HttpOracle {
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| OracleError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateRequest<'_>,
    ) -> Result<GenerateResponse, OracleError> {
        let url = self.endpoint(model);
        debug!(%url, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| OracleError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl Oracle for HttpOracle {
    #[instrument(skip_all, fields(model = %self.config.normalize_model))]
    async fn normalize(
        &self,
        image: &InlineImage,
        directive: &str,
    ) -> Result<Option<InlineImage>, OracleError> {
        let request = GenerateRequest::new(image, directive, GenerationConfig::image());
        let response = self.generate(&self.config.normalize_model, &request).await?;
        Ok(response.first_image())
    }

    #[instrument(skip_all, fields(model = %self.config.score_model))]
    async fn score(&self, image: &InlineImage, directive: &str) -> Result<String, OracleError> {
        let request = GenerateRequest::new(image, directive, GenerationConfig::rule_results());
        let response = self.generate(&self.config.score_model, &request).await?;
        Ok(response.text())
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

impl<'a> GenerateRequest<'a> {
    fn new(image: &'a InlineImage, directive: &'a str, generation_config: GenerationConfig) -> Self {
        Self {
            contents: [RequestContent {
                parts: [
                    RequestPart::InlineData { inline_data: image },
                    RequestPart::Text { text: directive },
                ],
            }],
            generation_config,
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 2],
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    #[serde(rename_all = "camelCase")]
    InlineData { inline_data: &'a InlineImage },
    Text { text: &'a str },
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

impl GenerationConfig {
    fn image() -> Self {
        Self {
            response_modalities: Some(vec!["IMAGE", "TEXT"]),
            ..Self::default()
        }
    }

    fn rule_results() -> Self {
        Self {
            response_mime_type: Some("application/json"),
            response_schema: Some(json!({
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "requirement": {"type": "STRING"},
                        "pass": {"type": "BOOLEAN"},
                        "reason": {"type": "STRING"}
                    },
                    "required": ["requirement", "pass", "reason"]
                }
            })),
            ..Self::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineImage>,
    text: Option<String>,
}

impl GenerateResponse {
    fn parts(&self) -> impl Iterator<Item = &ResponsePart> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|content| content.parts.iter())
    }

    /// First inline image of the first candidate.
    fn first_image(self) -> Option<InlineImage> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|part| part.inline_data)
    }

    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.parts().filter_map(|p| p.text.as_deref()).collect()
    }
}
