//! Final photo and print sheet rendering shared by sessions and the
//! upstream service.

use photopass_core::buffer::PixelBuffer;
use photopass_core::catalog::DocumentRequirements;
use photopass_core::encode::{encode, OutputFormat};
use photopass_core::sheet::{compose, PrintSheet};
use photopass_core::transform::{commit_with, FinalPhoto};
use photopass_core::viewport::ViewportState;
use tracing::info;

use crate::config::OutputConfig;
use crate::error::Result;
use crate::payload::InlineImage;

/// Crop then tile. Compose always runs after commit.
pub(crate) fn render(
    source: &PixelBuffer,
    requirements: &DocumentRequirements,
    viewport: &ViewportState,
    output: &OutputConfig,
) -> (FinalPhoto, PrintSheet) {
    let photo = commit_with(&output.transform(), source, requirements, viewport);
    let sheet = compose(&photo, output.sheet_width, output.sheet_height);
    info!(
        document = requirements.name,
        photo_width = photo.width(),
        photo_height = photo.height(),
        tiles = sheet.layout().tile_count(),
        "rendered final photo and print sheet"
    );
    (photo, sheet)
}

/// Encode both artifacts as JPEG inline images.
pub(crate) fn encode_jpeg_pair(
    photo: &FinalPhoto,
    sheet: &PrintSheet,
    output: &OutputConfig,
) -> Result<(InlineImage, InlineImage)> {
    let format = OutputFormat::Jpeg {
        quality: output.jpeg_quality,
    };
    let single = encode(photo.buffer(), format)?.into();
    let sheet = encode(sheet.buffer(), format)?.into();
    Ok((single, sheet))
}
