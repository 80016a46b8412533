//! Live compliance feedback while the user pans and zooms.
//!
//! The estimator is a pure O(1) function of the viewport and the document
//! requirements. It never touches pixels and never performs I/O, so it can
//! run on every pointer move.
//!
//! # Heuristics
//!
//! - Head size assumes the subject's head fills [`BASELINE_HEAD_PERCENT`] of
//!   the frame at zoom 1 and grows linearly with zoom. The baseline is a
//!   tunable framing assumption, not a measured value; override it through
//!   [`EstimatorParams`].
//! - Centering only checks the vertical offset. Head and chin placement rules
//!   are vertical, so horizontal pan is not judged.

use serde::Serialize;

use crate::catalog::DocumentRequirements;
use crate::viewport::Pan;

/// Assumed head height, percent of frame, at zoom 1.
pub const BASELINE_HEAD_PERCENT: f64 = 35.0;

/// Max vertical pan (viewport pixels) still considered centered.
pub const VERTICAL_THRESHOLD_PX: f64 = 100.0;

/// What a signal is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SignalSubject {
    HeadSize,
    Centering,
}

/// Pass/warn outcome of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStatus {
    Pass,
    Warn,
}

/// One live feedback item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceSignal {
    pub subject: SignalSubject,
    pub status: SignalStatus,
    pub message: &'static str,
}

impl ComplianceSignal {
    pub fn passed(&self) -> bool {
        self.status == SignalStatus::Pass
    }
}

/// Tunable estimator parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorParams {
    pub baseline_head_percent: f64,
    pub vertical_threshold_px: f64,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self {
            baseline_head_percent: BASELINE_HEAD_PERCENT,
            vertical_threshold_px: VERTICAL_THRESHOLD_PX,
        }
    }
}

/// Result of [`estimate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Estimated head height, percent of frame.
    pub head_percent: f64,
    pub head_size: ComplianceSignal,
    pub centering: ComplianceSignal,
}

impl Feedback {
    /// Pass only when every signal passes.
    pub fn overall(&self) -> SignalStatus {
        if self.signals().all(ComplianceSignal::passed) {
            SignalStatus::Pass
        } else {
            SignalStatus::Warn
        }
    }

    pub fn signals(&self) -> impl Iterator<Item = &ComplianceSignal> {
        [&self.head_size, &self.centering].into_iter()
    }
}

/// Estimate live feedback with the default heuristics.
pub fn estimate(zoom: f64, pan: Pan, requirements: &DocumentRequirements) -> Feedback {
    estimate_with(&EstimatorParams::default(), zoom, pan, requirements)
}

/// Estimate live feedback with explicit parameters.
pub fn estimate_with(
    params: &EstimatorParams,
    zoom: f64,
    pan: Pan,
    requirements: &DocumentRequirements,
) -> Feedback {
    let head_percent = params.baseline_head_percent * zoom;
    let range = requirements.head_height_percent;

    let head_size = if head_percent < range.min {
        signal(SignalSubject::HeadSize, SignalStatus::Warn, "Head size: Too small")
    } else if head_percent > range.max {
        signal(SignalSubject::HeadSize, SignalStatus::Warn, "Head size: Too large")
    } else if range.contains(head_percent) {
        signal(SignalSubject::HeadSize, SignalStatus::Pass, "Head size: Good")
    } else {
        // NaN zoom
        signal(SignalSubject::HeadSize, SignalStatus::Warn, "Head size: Unknown")
    };

    let centering = if pan.y.abs() <= params.vertical_threshold_px {
        signal(SignalSubject::Centering, SignalStatus::Pass, "Position: Centered")
    } else {
        signal(SignalSubject::Centering, SignalStatus::Warn, "Position: Not centered")
    };

    Feedback {
        head_percent,
        head_size,
        centering,
    }
}

fn signal(subject: SignalSubject, status: SignalStatus, message: &'static str) -> ComplianceSignal {
    ComplianceSignal {
        subject,
        status,
        message,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::catalog::countries;
    use proptest::prelude::*;

    proptest! {
        /// Property: head size passes exactly when baseline * zoom is in range.
        #[test]
        fn prop_head_status_matches_formula(zoom in 1.0f64..=3.0) {
            for country in countries() {
                for doc in country.document_types() {
                    let req = &doc.requirements;
                    let fb = estimate(zoom, Pan::default(), req);
                    let value = BASELINE_HEAD_PERCENT * zoom;
                    let in_range = value >= req.head_height_percent.min
                        && value <= req.head_height_percent.max;
                    prop_assert_eq!(fb.head_size.status == SignalStatus::Pass, in_range);
                }
            }
        }

        /// Property: centering depends only on |pan.y|.
        #[test]
        fn prop_centering_ignores_x(x in -5000.0f64..5000.0, y in -300.0f64..300.0) {
            let req = crate::catalog::lookup("DE", "passport_visa").unwrap();
            let fb = estimate(1.0, Pan::new(x, y), req);
            prop_assert_eq!(fb.centering.passed(), y.abs() <= VERTICAL_THRESHOLD_PX);
        }
    }
}
