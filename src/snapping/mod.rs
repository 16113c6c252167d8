//! Snapping and alignment while elements are dragged or resized
//!
//! - `candidates`: once-per-gesture gathering of anchor bounds
//! - `point_align`: edge/center alignment against single candidates
//! - `distribution`: equal-spacing alignment within a row or column
//! - `engine`: the per-gesture `SnapEngine` tying it together

pub mod candidates;
pub mod distribution;
pub mod engine;
pub mod guides;
pub mod point_align;

pub use candidates::{
    CandidateSet, SnapElement, SpatialIndex, Viewport, ViewportState,
};
pub use distribution::Axis;
pub use engine::SnapEngine;
pub use guides::{GuideKind, GuideLine};

use crate::geometry::Bound;

/// Correction to apply to the moving selection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Alignment {
    pub dx: f64,
    pub dy: f64,
}

impl Alignment {
    pub const NONE: Alignment = Alignment { dx: 0.0, dy: 0.0 };

    pub fn is_none(&self) -> bool {
        *self == Alignment::NONE
    }
}

/// Everything one alignment pass produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignOutcome {
    pub alignment: Alignment,
    /// Point guides first, then distribution guides.
    pub guides: Vec<GuideLine>,
}

/// Model-space snapping distance for a screen-space threshold at `zoom`.
pub fn threshold_for_zoom(threshold_px: f64, zoom: f64) -> f64 {
    threshold_px / zoom
}

/// Align `subject` against a gesture's candidates.
///
/// Point alignment runs first. Distribution alignment only runs for an axis
/// whose point correction is exactly zero.
pub fn compute_alignment(
    subject: &Bound,
    candidates: &CandidateSet,
    threshold: f64,
    zoom: f64,
) -> AlignOutcome {
    let points = point_align::solve(subject, &candidates.all, threshold);
    let mut alignment = Alignment {
        dx: points.dx,
        dy: points.dy,
    };
    let mut guides = points.guides;

    if alignment.dx == 0.0 {
        if let Some(found) = distribution::solve(
            Axis::Horizontal,
            subject,
            &candidates.horizontal_band,
            threshold,
            zoom,
        ) {
            alignment.dx = found.delta;
            guides.extend(found.guides);
        }
    }

    if alignment.dy == 0.0 {
        if let Some(found) = distribution::solve(
            Axis::Vertical,
            subject,
            &candidates.vertical_band,
            threshold,
            zoom,
        ) {
            alignment.dy = found.delta;
            guides.extend(found.guides);
        }
    }

    AlignOutcome { alignment, guides }
}
