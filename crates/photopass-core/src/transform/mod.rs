//! Crop/transform engine.
//!
//! Maps the interactive viewport (zoom + pan over a reference viewport) onto
//! a rectangle of the normalized source image and resamples it into a photo
//! whose pixel size is fixed by the document requirements.
//!
//! # Pipeline
//!
//! 1. [`source_region`] - viewport + requirements -> clamped pixel rectangle
//! 2. [`extract`] - copy that rectangle out of the source buffer
//! 3. [`resample`] - scale to `base_width` x `floor(base_width * h / w)`
//!
//! [`commit`] runs all three and never fails.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the source image
//! - Pan is in reference-viewport pixels; positive pan moves the region
//!   origin towards the top-left

mod commit;
mod extract;
mod region;
mod resample;

pub use commit::{
    commit, commit_with, FinalPhoto, TransformConfig, BASE_OUTPUT_WIDTH, BLANK_RGB,
};
pub use extract::extract;
pub use region::{
    source_region, viewport_size, CropRect, PixelRect, SourceRegion, REFERENCE_VIEWPORT_WIDTH,
};
pub use resample::{resample, ResampleFilter};
