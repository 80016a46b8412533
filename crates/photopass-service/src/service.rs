//! Upstream photo service.
//!
//! The request/response surface a web backend exposes: background
//! replacement, compliance checking, the joint analysis, session start and
//! final photo generation. Binary payloads travel as [`InlineImage`]s.

use std::sync::Arc;

use photopass_core::catalog::lookup;
use photopass_core::decode::decode_image;
use photopass_core::viewport::{CropData, ViewportState};
use serde::Serialize;
use tracing::{info, instrument};

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::oracle::{HttpOracle, Oracle, OracleClient, OracleResult, RuleResult};
use crate::payload::InlineImage;
use crate::render::{encode_jpeg_pair, render};
use crate::session::EditSession;

/// JPEG-encoded outputs of [`PhotoService::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPhotos {
    pub single_photo: InlineImage,
    pub print_sheet: InlineImage,
}

pub struct PhotoService {
    client: OracleClient,
    config: ServiceConfig,
}

impl PhotoService {
    pub fn new(oracle: Arc<dyn Oracle>, config: ServiceConfig) -> Self {
        Self {
            client: OracleClient::new(oracle),
            config,
        }
    }

    /// Build a service backed by [`HttpOracle`].
    pub fn from_config(config: ServiceConfig) -> Result<Self> {
        config.validate()?;
        let oracle = HttpOracle::new(config.oracle.clone())?;
        Ok(Self::new(Arc::new(oracle), config))
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Replace the photo background with `background_color`.
    #[instrument(skip(self, photo), fields(image_len = photo.len()))]
    pub async fn process(&self, photo: &InlineImage, background_color: &str) -> Result<InlineImage> {
        Ok(self.client.normalize(photo, background_color).await?)
    }

    /// Score the photo against the document rules.
    #[instrument(skip(self, photo), fields(image_len = photo.len()))]
    pub async fn check_compliance(
        &self,
        photo: &InlineImage,
        country: &str,
        photo_type: &str,
    ) -> Result<Vec<RuleResult>> {
        let requirements = lookup(country, photo_type)?;
        Ok(self.client.score(photo, requirements.rules).await?)
    }

    /// Normalize and score concurrently.
    #[instrument(skip(self, photo), fields(image_len = photo.len()))]
    pub async fn analyze(
        &self,
        photo: &InlineImage,
        country: &str,
        photo_type: &str,
    ) -> Result<OracleResult> {
        let requirements = lookup(country, photo_type)?;
        Ok(self.client.process(photo, requirements).await?)
    }

    /// Start an interactive edit session; the analysis runs in the background.
    pub async fn start_session(
        &self,
        photo: InlineImage,
        country: &str,
        photo_type: &str,
    ) -> Result<EditSession> {
        EditSession::start(
            self.client.clone(),
            photo,
            country,
            photo_type,
            self.config.output,
        )
        .await
    }

    /// Crop `photo` as described by `crop` and tile it onto a print sheet.
    ///
    /// `photo` is normally the normalized image returned by
    /// [`process`](Self::process).
    #[instrument(skip(self, photo), fields(image_len = photo.len()))]
    pub async fn generate(
        &self,
        photo: InlineImage,
        country: &str,
        photo_type: &str,
        crop: CropData,
    ) -> Result<GeneratedPhotos> {
        let requirements = lookup(country, photo_type)?;
        let output = self.config.output;
        let viewport = ViewportState::from(crop);

        let (single_photo, print_sheet) = tokio::task::spawn_blocking(move || {
            let source = decode_image(&photo.data)?;
            let (final_photo, sheet) = render(&source, requirements, &viewport, &output);
            encode_jpeg_pair(&final_photo, &sheet, &output)
        })
        .await??;

        info!(
            single_len = single_photo.len(),
            sheet_len = print_sheet.len(),
            "generated photos"
        );
        Ok(GeneratedPhotos {
            single_photo,
            print_sheet,
        })
    }
}
