//! Per-gesture snap engine
//!
//! A `SnapEngine` belongs to exactly one drag/resize gesture. The gesture
//! controller creates it at pointer-down, calls `set_moving_elements` once,
//! calls `align` on every pointer move and drops it at pointer-up. Nothing
//! is shared between gestures.

use super::candidates::{self, CandidateSet, SnapElement, SpatialIndex, Viewport};
use super::guides::GuideLine;
use super::{compute_alignment, threshold_for_zoom, Alignment};
use crate::core::settings::ALIGN_THRESHOLD;
use crate::geometry::Bound;

#[derive(Debug, Clone)]
pub struct SnapEngine {
    /// Snap distance in screen pixels; divided by the live zoom on use.
    threshold_px: f64,
    candidates: CandidateSet,
    guides: Vec<GuideLine>,
}

impl Default for SnapEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapEngine {
    pub fn new() -> Self {
        Self::with_threshold(ALIGN_THRESHOLD)
    }

    pub fn with_threshold(threshold_px: f64) -> Self {
        Self {
            threshold_px,
            candidates: CandidateSet::default(),
            guides: Vec::new(),
        }
    }

    /// Gather snapping candidates for a new gesture.
    ///
    /// Returns the union of the moving elements' bounds, which is the
    /// subject later `align` calls should be made with. An empty `moving`
    /// list returns a zero bound and leaves the engine cleared.
    pub fn set_moving_elements<E, I, V>(
        &mut self,
        moving: &[E],
        excluded: &[E],
        index: &I,
        viewport: &V,
    ) -> Bound
    where
        E: SnapElement,
        I: SpatialIndex<Element = E> + ?Sized,
        V: Viewport + ?Sized,
    {
        self.clear();

        let threshold = threshold_for_zoom(self.threshold_px, viewport.zoom());
        let Some((subject, candidates)) =
            candidates::gather(moving, excluded, index, viewport, threshold)
        else {
            return Bound::ZERO;
        };

        log::debug!(
            "Snap candidates for {} moving element(s): {} in row, {} in column, {} total",
            moving.len(),
            candidates.horizontal_band.len(),
            candidates.vertical_band.len(),
            candidates.all.len()
        );

        self.candidates = candidates;
        subject
    }

    /// Compute the correction for `subject` and rebuild the guide lines.
    ///
    /// The threshold is derived from the viewport's zoom on every call, since
    /// zoom can change in the middle of a gesture.
    pub fn align<V>(&mut self, subject: Bound, viewport: &V) -> Alignment
    where
        V: Viewport + ?Sized,
    {
        let zoom = viewport.zoom();
        let threshold = threshold_for_zoom(self.threshold_px, zoom);
        let outcome =
            compute_alignment(&subject, &self.candidates, threshold, zoom);

        if !outcome.alignment.is_none() {
            log::trace!(
                "Snapped {} by ({:.2}, {:.2})",
                subject,
                outcome.alignment.dx,
                outcome.alignment.dy
            );
        }

        self.guides = outcome.guides;
        outcome.alignment
    }

    /// Drop candidates and guides. `align` returns no correction until
    /// `set_moving_elements` is called again.
    pub fn clear(&mut self) {
        self.candidates = CandidateSet::default();
        self.guides.clear();
    }

    /// Guide lines from the last `align` call.
    pub fn guide_lines(&self) -> &[GuideLine] {
        &self.guides
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }
}
