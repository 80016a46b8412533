//! Photopass Core - passport and visa photo engine
//!
//! This crate holds the synchronous, I/O-free part of the pipeline: the
//! per-country requirements catalog, the interactive viewport, the local
//! compliance estimator, the crop/transform engine, the print sheet composer,
//! and the image codecs they share.

pub mod buffer;
pub mod catalog;
pub mod decode;
pub mod encode;
pub mod feedback;
pub mod sheet;
pub mod transform;
pub mod viewport;

pub use buffer::PixelBuffer;
pub use catalog::{countries, lookup, CatalogError, Country, DocumentRequirements, DocumentType};
pub use feedback::{estimate, estimate_with, EstimatorParams, Feedback, SignalStatus};
pub use sheet::{compose, compose_with_background, PrintSheet, SheetLayout};
pub use transform::{commit, commit_with, FinalPhoto, TransformConfig};
pub use viewport::{CropData, Pan, ViewportState};

#[cfg(test)]
mod tests {
    use super::*;

    /// Catalog -> viewport -> estimator -> commit -> sheet, end to end.
    #[test]
    fn test_pipeline_end_to_end() {
        let req = lookup("gb", "Passport").unwrap();
        let mut viewport = ViewportState::default();
        viewport.set_zoom(2.0);

        let feedback = estimate(viewport.zoom(), viewport.pan(), req);
        assert_eq!(feedback.overall(), SignalStatus::Pass);

        let source = PixelBuffer::filled(800, 1000, [180, 170, 160]);
        let photo = commit(&source, req, &viewport);
        assert_eq!((photo.width(), photo.height()), (600, 771));

        let sheet = compose(&photo, sheet::SHEET_WIDTH, sheet::SHEET_HEIGHT);
        assert_eq!(sheet.layout().tile_count(), 3);

        let encoded = encode::encode(sheet.buffer(), encode::OutputFormat::default()).unwrap();
        let decoded = decode::decode_image(&encoded.bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (1800, 1200));
    }
}
