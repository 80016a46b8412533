//! Oracle client.
//!
//! The oracle is an external model service that answers two questions about
//! a captured portrait:
//!
//! - **normalize**: return the same portrait with its background replaced by
//!   the document's required color;
//! - **score**: judge the portrait against the document's ordered rule list.
//!
//! [`OracleClient::process`] issues both requests concurrently and joins
//! them: it resolves when both have succeeded and fails as soon as either
//! fails. There is no partial success and no internal retry.
//!
//! Transports implement [`Oracle`]. [`HttpOracle`] talks to a
//! `generateContent` endpoint; tests use in-memory oracles.

mod http;
#[cfg(test)]
pub(crate) mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use photopass_core::catalog::DocumentRequirements;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::payload::InlineImage;

pub use http::HttpOracle;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// Normalize finished without returning an image.
    #[error("oracle returned no image")]
    EmptyResponse,

    /// Score output could not be parsed or had the wrong number of entries.
    #[error("malformed oracle response: {0}")]
    MalformedResponse(String),

    #[error("oracle transport error: {0}")]
    Transport(String),

    #[error("oracle returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The pending analysis was aborted before it completed.
    #[error("oracle request aborted")]
    Aborted,
}

/// Verdict for one rule, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub requirement: String,
    pub pass: bool,
    pub reason: String,
}

/// Joined outcome of one analysis round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleResult {
    pub normalized_image: InlineImage,
    pub rule_results: Vec<RuleResult>,
}

impl OracleResult {
    pub fn all_passed(&self) -> bool {
        self.rule_results.iter().all(|r| r.pass)
    }
}

/// Transport seam for the two oracle requests.
///
/// Implementations return raw answers; validation happens in
/// [`OracleClient`].
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Run the normalize directive. `Ok(None)` means the oracle answered
    /// without an image.
    async fn normalize(
        &self,
        image: &InlineImage,
        directive: &str,
    ) -> Result<Option<InlineImage>, OracleError>;

    /// Run the score directive and return the oracle's JSON text.
    async fn score(&self, image: &InlineImage, directive: &str) -> Result<String, OracleError>;
}

/// Directive for background replacement.
pub fn normalize_directive(background_color: &str) -> String {
    format!(
        "Replace the background of this portrait with a solid, uniform, plain \
         {background_color} color suitable for an official passport photo. Ensure there \
         are no shadows and the subject is clearly separated from the new background."
    )
}

/// Directive for rule scoring. Rules are listed one per line, in order.
pub fn score_directive(rules: &[&str]) -> String {
    let list: String = rules.iter().map(|rule| format!("\n- {rule}")).collect();
    format!(
        "Analyze this photo for passport compliance based on the following rules:{list}\n\n\
         Return your analysis as a JSON array with exactly one entry per rule, in the same \
         order. For each rule, determine if the photo passes and provide a short reason."
    )
}

/// Parse the score answer, requiring exactly one entry per rule.
pub fn parse_rule_results(text: &str, expected: usize) -> Result<Vec<RuleResult>, OracleError> {
    let results: Vec<RuleResult> = serde_json::from_str(text.trim())
        .map_err(|e| OracleError::MalformedResponse(e.to_string()))?;
    if results.len() != expected {
        return Err(OracleError::MalformedResponse(format!(
            "expected {expected} rule results, got {}",
            results.len()
        )));
    }
    Ok(results)
}

/// Validating front end over an [`Oracle`] transport.
#[derive(Clone)]
pub struct OracleClient {
    oracle: Arc<dyn Oracle>,
}

impl OracleClient {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Replace the background of `image` with `background_color`.
    #[instrument(skip_all, fields(background = background_color, image_len = image.len()))]
    pub async fn normalize(
        &self,
        image: &InlineImage,
        background_color: &str,
    ) -> Result<InlineImage, OracleError> {
        let directive = normalize_directive(background_color);
        match self.oracle.normalize(image, &directive).await? {
            Some(normalized) if !normalized.is_empty() => {
                debug!(mime_type = %normalized.mime_type, len = normalized.len(), "normalized image received");
                Ok(normalized)
            }
            _ => {
                warn!("normalize returned no image");
                Err(OracleError::EmptyResponse)
            }
        }
    }

    /// Score `image` against `rules`, one result per rule.
    #[instrument(skip_all, fields(rules = rules.len(), image_len = image.len()))]
    pub async fn score(
        &self,
        image: &InlineImage,
        rules: &[&str],
    ) -> Result<Vec<RuleResult>, OracleError> {
        let text = self.oracle.score(image, &score_directive(rules)).await?;
        let results = parse_rule_results(&text, rules.len()).inspect_err(|e| {
            warn!(error = %e, "score response rejected");
        })?;
        debug!(passed = results.iter().filter(|r| r.pass).count(), "rule results received");
        Ok(results)
    }

    /// Run normalize and score concurrently against the same image.
    pub async fn process(
        &self,
        image: &InlineImage,
        requirements: &DocumentRequirements,
    ) -> Result<OracleResult, OracleError> {
        let (normalized_image, rule_results) = tokio::try_join!(
            self.normalize(image, requirements.background_color),
            self.score(image, requirements.rules),
        )?;
        Ok(OracleResult {
            normalized_image,
            rule_results,
        })
    }

    /// Start [`process`](Self::process) on a Tokio task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(
        &self,
        image: InlineImage,
        requirements: &'static DocumentRequirements,
    ) -> PendingAnalysis {
        let client = self.clone();
        let handle = tokio::spawn(async move { client.process(&image, requirements).await });
        PendingAnalysis { handle }
    }
}

/// An analysis running in the background.
#[derive(Debug)]
pub struct PendingAnalysis {
    handle: JoinHandle<Result<OracleResult, OracleError>>,
}

impl PendingAnalysis {
    /// Request cancellation. In-flight HTTP requests are dropped; the
    /// remote side may still complete them.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the result. An aborted analysis yields [`OracleError::Aborted`].
    pub async fn wait(mut self) -> Result<OracleResult, OracleError> {
        self.join().await
    }

    /// Wait for the result without giving up the handle.
    ///
    /// Dropping the returned future leaves the task running and the handle
    /// usable. Once this has resolved the handle must not be joined again.
    pub async fn join(&mut self) -> Result<OracleResult, OracleError> {
        match (&mut self.handle).await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(OracleError::Aborted),
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }
}
