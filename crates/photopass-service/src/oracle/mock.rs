//! In-memory oracle for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use photopass_core::buffer::PixelBuffer;
use photopass_core::encode::{encode, OutputFormat};

use super::{Oracle, OracleError};
use crate::payload::InlineImage;

/// A small PNG portrait stand-in.
pub(crate) fn sample_image() -> InlineImage {
    image_of(40, 50, [120, 110, 100])
}

pub(crate) fn image_of(width: u32, height: u32, rgb: [u8; 3]) -> InlineImage {
    let buffer = PixelBuffer::filled(width, height, rgb);
    encode(&buffer, OutputFormat::Png).unwrap().into()
}

/// JSON score answer with `count` passing entries.
pub(crate) fn passing_score(count: usize) -> String {
    let entries: Vec<_> = (0..count)
        .map(|i| serde_json::json!({"requirement": format!("rule {i}"), "pass": true, "reason": "ok"}))
        .collect();
    serde_json::Value::Array(entries).to_string()
}

pub(crate) struct MockOracle {
    normalize: Result<Option<InlineImage>, OracleError>,
    score: Result<String, OracleError>,
    normalize_delay: Duration,
    score_delay: Duration,
    normalize_calls: AtomicUsize,
    score_calls: AtomicUsize,
    directives: Mutex<Vec<String>>,
}

impl MockOracle {
    /// Answers with a white 60x60 image and `rule_count` passing rules.
    pub(crate) fn passing(rule_count: usize) -> Self {
        Self {
            normalize: Ok(Some(image_of(60, 60, [255, 255, 255]))),
            score: Ok(passing_score(rule_count)),
            normalize_delay: Duration::ZERO,
            score_delay: Duration::ZERO,
            normalize_calls: AtomicUsize::new(0),
            score_calls: AtomicUsize::new(0),
            directives: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_normalize(mut self, answer: Result<Option<InlineImage>, OracleError>) -> Self {
        self.normalize = answer;
        self
    }

    pub(crate) fn with_score(mut self, answer: Result<String, OracleError>) -> Self {
        self.score = answer;
        self
    }

    pub(crate) fn with_delays(mut self, normalize: Duration, score: Duration) -> Self {
        self.normalize_delay = normalize;
        self.score_delay = score;
        self
    }

    pub(crate) fn normalize_calls(&self) -> usize {
        self.normalize_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn score_calls(&self) -> usize {
        self.score_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn directives(&self) -> Vec<String> {
        self.directives.lock().unwrap().clone()
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn normalize(
        &self,
        _image: &InlineImage,
        directive: &str,
    ) -> Result<Option<InlineImage>, OracleError> {
        self.normalize_calls.fetch_add(1, Ordering::SeqCst);
        self.directives.lock().unwrap().push(directive.to_string());
        tokio::time::sleep(self.normalize_delay).await;
        self.normalize.clone()
    }

    async fn score(&self, _image: &InlineImage, directive: &str) -> Result<String, OracleError> {
        self.score_calls.fetch_add(1, Ordering::SeqCst);
        self.directives.lock().unwrap().push(directive.to_string());
        tokio::time::sleep(self.score_delay).await;
        self.score.clone()
    }
}
