//! Edit session.
//!
//! One session per captured photo. Starting a session looks up the document
//! requirements and kicks off the oracle analysis in the background; the
//! user meanwhile adjusts the viewport and sees live feedback. Committing
//! crops the normalized image and tiles it onto a print sheet.

use photopass_core::catalog::{lookup, DocumentRequirements};
use photopass_core::decode::decode_image;
use photopass_core::feedback::{estimate_with, EstimatorParams, Feedback};
use photopass_core::sheet::PrintSheet;
use photopass_core::transform::FinalPhoto;
use photopass_core::viewport::ViewportState;
use tracing::{debug, info, warn};

use crate::config::OutputConfig;
use crate::error::{Result, ServiceError};
use crate::oracle::{OracleClient, OracleResult, PendingAnalysis};
use crate::payload::InlineImage;
use crate::render::render;

/// Terminal artifacts of a committed session.
#[derive(Debug, Clone)]
pub struct SessionOutput {
    pub final_photo: FinalPhoto,
    pub print_sheet: PrintSheet,
}

pub struct EditSession {
    client: OracleClient,
    source: InlineImage,
    requirements: &'static DocumentRequirements,
    viewport: ViewportState,
    estimator: EstimatorParams,
    output: OutputConfig,
    pending: Option<PendingAnalysis>,
    analysis: Option<OracleResult>,
}

impl EditSession {
    /// Look up the requirements and start the analysis.
    ///
    /// Fails only if the country/document pair is unknown.
    pub async fn start(
        client: OracleClient,
        source: InlineImage,
        country: &str,
        document_type: &str,
        output: OutputConfig,
    ) -> Result<Self> {
        let requirements = lookup(country, document_type)?;
        info!(country, document_type, document = requirements.name, "edit session started");

        let pending = client.spawn(source.clone(), requirements);
        Ok(Self {
            client,
            source,
            requirements,
            viewport: ViewportState::default(),
            estimator: EstimatorParams::default(),
            output,
            pending: Some(pending),
            analysis: None,
        })
    }

    pub fn with_estimator(mut self, estimator: EstimatorParams) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn requirements(&self) -> &'static DocumentRequirements {
        self.requirements
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Feedback {
        self.viewport.set_zoom(zoom);
        self.feedback()
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Feedback {
        self.viewport.pan_by(dx, dy);
        self.feedback()
    }

    pub fn reset_viewport(&mut self) -> Feedback {
        self.viewport.reset();
        self.feedback()
    }

    /// Live estimate for the current viewport.
    pub fn feedback(&self) -> Feedback {
        estimate_with(
            &self.estimator,
            self.viewport.zoom(),
            self.viewport.pan(),
            self.requirements,
        )
    }

    /// The analysis result, if it has already been awaited.
    pub fn analysis(&self) -> Option<&OracleResult> {
        self.analysis.as_ref()
    }

    /// Wait for the background analysis.
    ///
    /// A failure is terminal for this attempt; call
    /// [`retry_analysis`](Self::retry_analysis) to try again with the same
    /// source image. Dropping the returned future keeps the analysis
    /// running; a later call picks it up again.
    pub async fn await_analysis(&mut self) -> Result<&OracleResult> {
        if self.analysis.is_none() {
            let pending = self.pending.as_mut().ok_or(ServiceError::AnalysisPending)?;
            let outcome = pending.join().await;
            self.pending = None;
            match outcome {
                Ok(result) => {
                    debug!(rules = result.rule_results.len(), "analysis stored");
                    self.analysis = Some(result);
                }
                Err(err) => {
                    warn!(error = %err, "analysis failed");
                    return Err(err.into());
                }
            }
        }
        self.analysis.as_ref().ok_or(ServiceError::AnalysisPending)
    }

    /// Drop any previous result and ask the oracle again.
    pub fn retry_analysis(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.analysis = None;
        info!("retrying analysis");
        self.pending = Some(self.client.spawn(self.source.clone(), self.requirements));
    }

    /// End the session without committing.
    pub fn abandon(self) {
        if let Some(pending) = &self.pending {
            pending.abort();
        }
        debug!("edit session abandoned");
    }

    /// Crop the normalized image and compose the print sheet.
    ///
    /// Requires a completed analysis; see [`await_analysis`](Self::await_analysis).
    pub async fn commit(self) -> Result<SessionOutput> {
        let analysis = self.analysis.ok_or(ServiceError::AnalysisPending)?;
        if let Some(pending) = &self.pending {
            pending.abort();
        }

        let requirements = self.requirements;
        let viewport = self.viewport;
        let output = self.output;
        let (final_photo, print_sheet) = tokio::task::spawn_blocking(move || {
            let source = decode_image(&analysis.normalized_image.data)?;
            Ok::<_, ServiceError>(render(&source, requirements, &viewport, &output))
        })
        .await??;

        Ok(SessionOutput {
            final_photo,
            print_sheet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::mock::{image_of, sample_image, MockOracle};
    use crate::oracle::OracleError;
    use photopass_core::feedback::SignalStatus;
    use std::sync::Arc;
    use std::time::Duration;

    async fn session_with(oracle: MockOracle) -> EditSession {
        EditSession::start(
            OracleClient::new(Arc::new(oracle)),
            sample_image(),
            "GB",
            "passport",
            OutputConfig::default(),
        )
        .await
        .unwrap()
    }

    fn gb_rules() -> usize {
        lookup("GB", "passport").unwrap().rules.len()
    }

    #[tokio::test]
    async fn test_unknown_document_fails_fast() {
        let result = EditSession::start(
            OracleClient::new(Arc::new(MockOracle::passing(1))),
            sample_image(),
            "ZZ",
            "unknown",
            OutputConfig::default(),
        )
        .await;
        assert!(matches!(result, Err(ServiceError::Catalog(_))));
    }

    #[tokio::test]
    async fn test_feedback_tracks_viewport() {
        let mut session = session_with(MockOracle::passing(gb_rules())).await;
        // 35% at zoom 1 is below the 63-75% range
        assert_eq!(session.feedback().head_size.status, SignalStatus::Warn);

        let fb = session.set_zoom(1.8);
        assert_eq!(fb.head_size.status, SignalStatus::Pass);

        let fb = session.pan_by(0.0, 150.0);
        assert_eq!(fb.centering.status, SignalStatus::Warn);

        let fb = session.reset_viewport();
        assert_eq!(fb.centering.status, SignalStatus::Pass);
        assert_eq!(session.viewport().zoom(), 1.0);
    }

    #[tokio::test]
    async fn test_commit_before_analysis_is_rejected() {
        let session = session_with(MockOracle::passing(gb_rules())).await;
        assert!(matches!(
            session.commit().await,
            Err(ServiceError::AnalysisPending)
        ));
    }

    #[tokio::test]
    async fn test_full_session() {
        let mut session = session_with(MockOracle::passing(gb_rules())).await;
        session.set_zoom(2.0);

        let analysis = session.await_analysis().await.unwrap();
        assert!(analysis.all_passed());

        let output = session.commit().await.unwrap();
        assert_eq!(
            (output.final_photo.width(), output.final_photo.height()),
            (600, 771)
        );
        assert_eq!(output.print_sheet.layout().tile_count(), 3);
        // Normalized image is white
        assert_eq!(
            output.final_photo.buffer().pixel(300, 300),
            Some([255, 255, 255])
        );
    }

    #[tokio::test]
    async fn test_failed_analysis_can_be_retried() {
        let oracle = MockOracle::passing(gb_rules()).with_normalize(Ok(None));
        let mut session = session_with(oracle).await;

        assert!(matches!(
            session.await_analysis().await,
            Err(ServiceError::Oracle(OracleError::EmptyResponse))
        ));
        // Nothing pending until retried
        assert!(matches!(
            session.await_analysis().await,
            Err(ServiceError::AnalysisPending)
        ));

        session.retry_analysis();
        assert!(session.await_analysis().await.is_err());
    }

    #[tokio::test]
    async fn test_interrupted_wait_can_resume() {
        let oracle = MockOracle::passing(gb_rules())
            .with_delays(Duration::from_millis(100), Duration::from_millis(100));
        let mut session = session_with(oracle).await;

        let early = tokio::time::timeout(Duration::from_millis(10), session.await_analysis()).await;
        assert!(early.is_err());

        let analysis = session.await_analysis().await.unwrap();
        assert!(analysis.all_passed());
        assert!(session.commit().await.is_ok());
    }

    #[tokio::test]
    async fn test_retry_replaces_result() {
        let oracle = Arc::new(MockOracle::passing(gb_rules()));
        let mut session = EditSession::start(
            OracleClient::new(oracle.clone()),
            sample_image(),
            "GB",
            "passport",
            OutputConfig::default(),
        )
        .await
        .unwrap();

        session.await_analysis().await.unwrap();
        session.retry_analysis();
        assert!(session.analysis().is_none());
        session.await_analysis().await.unwrap();
        assert_eq!(oracle.normalize_calls(), 2);
    }

    #[tokio::test]
    async fn test_undecodable_normalized_image() {
        let oracle = MockOracle::passing(gb_rules())
            .with_normalize(Ok(Some(InlineImage::new("image/png", vec![1, 2, 3]))));
        let mut session = session_with(oracle).await;
        session.await_analysis().await.unwrap();
        assert!(matches!(
            session.commit().await,
            Err(ServiceError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_custom_output_size() {
        let us_rules = lookup("US", "passport_visa").unwrap().rules.len();
        let oracle = MockOracle::passing(us_rules)
            .with_normalize(Ok(Some(image_of(20, 20, [0, 0, 0]))));
        let mut session = EditSession::start(
            OracleClient::new(Arc::new(oracle)),
            sample_image(),
            "US",
            "passport_visa",
            OutputConfig {
                base_width: 300,
                sheet_width: 900,
                sheet_height: 600,
                ..OutputConfig::default()
            },
        )
        .await
        .unwrap();

        session.await_analysis().await.unwrap();
        let output = session.commit().await.unwrap();
        assert_eq!(output.final_photo.width(), 300);
        assert_eq!(output.print_sheet.layout().tile_count(), 6);
    }
}
