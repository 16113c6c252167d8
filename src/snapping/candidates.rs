//! Candidate gathering
//!
//! At the start of a gesture the spatial index is queried once for two
//! bands around the moving selection: a horizontal band spanning the
//! viewport at the selection's height, and a vertical band spanning the
//! viewport at the selection's width. Everything `align` does afterwards
//! only looks at these cached groups.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::geometry::Bound;

/// An element that can take part in snapping.
pub trait SnapElement {
    type Id: Copy + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;

    fn bound(&self) -> Bound;

    /// Whether other elements may snap to this one. Connector-like elements
    /// return `false`.
    fn is_alignable(&self) -> bool {
        true
    }
}

/// Window queries over the canvas.
pub trait SpatialIndex {
    type Element: SnapElement;

    /// Every element whose bound intersects `window`.
    fn query(&self, window: Bound) -> Vec<Self::Element>;
}

/// Linear scan over a slice. Good enough for small scenes and tests.
impl<E> SpatialIndex for [E]
where
    E: SnapElement + Clone,
{
    type Element = E;

    fn query(&self, window: Bound) -> Vec<E> {
        self.iter()
            .filter(|element| element.bound().intersects(&window))
            .cloned()
            .collect()
    }
}

impl<E> SpatialIndex for Vec<E>
where
    E: SnapElement + Clone,
{
    type Element = E;

    fn query(&self, window: Bound) -> Vec<E> {
        self.as_slice().query(window)
    }
}

/// Live zoom and visible area of the canvas.
pub trait Viewport {
    fn zoom(&self) -> f64;

    /// The visible area in model space.
    fn viewport_bounds(&self) -> Bound;
}

/// A plain viewport value, for callers that read camera state up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub zoom: f64,
    pub bounds: Bound,
}

impl ViewportState {
    pub fn new(zoom: f64, bounds: Bound) -> ViewportState {
        ViewportState { zoom, bounds }
    }
}

impl Viewport for ViewportState {
    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn viewport_bounds(&self) -> Bound {
        self.bounds
    }
}

/// Bounds gathered for one gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    /// Elements at the selection's height; used for horizontal distribution.
    pub horizontal_band: Vec<Bound>,
    /// Elements at the selection's width; used for vertical distribution.
    pub vertical_band: Vec<Bound>,
    /// Column band followed by row band, without duplicates; used for point
    /// alignment. An element in both bands sits at its row-band position.
    pub all: Vec<Bound>,
}

impl CandidateSet {
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Query windows for a moving bound: a band at the moving bound's height
/// and one at its width. Each starts at whichever of the moving bound and
/// the viewport reaches further out, and is as long as the larger of the two.
pub fn query_windows(moving: &Bound, viewport: &Bound) -> (Bound, Bound) {
    let horizontal = Bound::new(
        moving.min_x().min(viewport.min_x()),
        moving.min_y(),
        moving.w.max(viewport.w),
        moving.h,
    );
    let vertical = Bound::new(
        moving.min_x(),
        moving.min_y().min(viewport.min_y()),
        moving.w,
        moving.h.max(viewport.h),
    );
    (horizontal, vertical)
}

/// Query the index around the moving elements and drop everything that
/// must never act as an anchor.
///
/// Returns the union of the moving bounds (not expanded) together with the
/// candidate groups, or `None` when nothing is moving.
pub fn gather<E, I, V>(
    moving: &[E],
    excluded: &[E],
    index: &I,
    viewport: &V,
    threshold: f64,
) -> Option<(Bound, CandidateSet)>
where
    E: SnapElement,
    I: SpatialIndex<Element = E> + ?Sized,
    V: Viewport + ?Sized,
{
    let subject = Bound::union_all(moving.iter().map(SnapElement::bound))?;

    let skipped: HashSet<_> =
        moving.iter().chain(excluded).map(SnapElement::id).collect();

    let (horizontal_window, vertical_window) =
        query_windows(&subject.expand(threshold), &viewport.viewport_bounds());

    let keep = |element: &E| {
        element.is_alignable() && !skipped.contains(&element.id())
    };
    let horizontal: Vec<_> = index
        .query(horizontal_window)
        .into_iter()
        .filter(|element| keep(element))
        .collect();
    let vertical: Vec<_> = index
        .query(vertical_window)
        .into_iter()
        .filter(|element| keep(element))
        .collect();

    // Column first, then row; an element in both keeps its row position
    let both: Vec<&E> = vertical.iter().chain(&horizontal).collect();
    let last_seen: HashMap<_, _> = both
        .iter()
        .enumerate()
        .map(|(position, element)| (element.id(), position))
        .collect();
    let all = both
        .iter()
        .enumerate()
        .filter(|(position, element)| last_seen[&element.id()] == *position)
        .map(|(_, element)| element.bound())
        .collect();

    let candidates = CandidateSet {
        horizontal_band: horizontal.iter().map(SnapElement::bound).collect(),
        vertical_band: vertical.iter().map(SnapElement::bound).collect(),
        all,
    };

    Some((subject, candidates))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Shape {
        id: u32,
        bound: Bound,
        connector: bool,
    }

    impl SnapElement for Shape {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }

        fn bound(&self) -> Bound {
            self.bound
        }

        fn is_alignable(&self) -> bool {
            !self.connector
        }
    }

    fn shape(id: u32, x: f64, y: f64) -> Shape {
        Shape {
            id,
            bound: Bound::new(x, y, 50.0, 50.0),
            connector: false,
        }
    }

    fn viewport() -> ViewportState {
        ViewportState::new(1.0, Bound::new(0.0, 0.0, 1000.0, 1000.0))
    }

    #[test]
    fn test_windows_reach_viewport_edges() {
        let moving = Bound::new(400.0, 300.0, 100.0, 50.0);
        let (horizontal, vertical) =
            query_windows(&moving, &Bound::new(0.0, 0.0, 1000.0, 800.0));

        assert_eq!(horizontal, Bound::new(0.0, 300.0, 1000.0, 50.0));
        assert_eq!(vertical, Bound::new(400.0, 0.0, 100.0, 800.0));
    }

    #[test]
    fn test_windows_when_selection_overhangs_viewport() {
        let moving = Bound::new(900.0, 300.0, 200.0, 50.0);
        let (horizontal, vertical) =
            query_windows(&moving, &Bound::new(0.0, 0.0, 1000.0, 800.0));

        // Starts at the viewport edge and keeps the viewport's width
        assert_eq!(horizontal, Bound::new(0.0, 300.0, 1000.0, 50.0));
        assert_eq!(vertical, Bound::new(900.0, 0.0, 200.0, 800.0));
    }

    #[test]
    fn test_all_lists_column_before_row() {
        let moving = shape(0, 400.0, 400.0);
        let row_only = shape(1, 100.0, 400.0);
        let column_only = shape(2, 400.0, 100.0);
        let both = shape(3, 410.0, 410.0);
        let scene = vec![
            moving.clone(),
            both.clone(),
            row_only.clone(),
            column_only.clone(),
        ];

        let (_, candidates) = gather(&[moving], &[], &scene, &viewport(), 8.0)
            .expect("moving selection is not empty");

        assert_eq!(
            candidates.vertical_band,
            vec![both.bound, column_only.bound]
        );
        assert_eq!(
            candidates.horizontal_band,
            vec![both.bound, row_only.bound]
        );
        assert_eq!(
            candidates.all,
            vec![column_only.bound, both.bound, row_only.bound],
            "shared element keeps its place in the row band"
        );
    }

    #[test]
    fn test_bands_and_dedup() {
        let moving = shape(0, 400.0, 400.0);
        let scene = vec![
            moving.clone(),
            shape(1, 100.0, 400.0), // same row
            shape(2, 400.0, 100.0), // same column
            shape(3, 100.0, 100.0), // neither
            shape(4, 410.0, 410.0), // overlaps, in both bands
        ];

        let (subject, candidates) =
            gather(&[moving.clone()], &[], &scene, &viewport(), 8.0)
                .expect("moving selection is not empty");

        assert_eq!(subject, moving.bound);
        assert_eq!(candidates.horizontal_band.len(), 2);
        assert_eq!(candidates.vertical_band.len(), 2);
        assert_eq!(candidates.all.len(), 3, "shape 4 appears once");
        assert!(!candidates.all.contains(&scene[3].bound));
        assert!(!candidates.all.contains(&moving.bound));
    }

    #[test]
    fn test_excluded_and_connectors_are_dropped() {
        let moving = shape(0, 400.0, 400.0);
        let excluded = shape(1, 100.0, 400.0);
        let mut connector = shape(2, 700.0, 400.0);
        connector.connector = true;
        let kept = shape(3, 400.0, 700.0);
        let scene =
            vec![moving.clone(), excluded.clone(), connector, kept.clone()];

        let (_, candidates) =
            gather(&[moving], &[excluded], &scene, &viewport(), 8.0)
                .expect("moving selection is not empty");

        assert_eq!(candidates.all, vec![kept.bound]);
        assert!(candidates.horizontal_band.is_empty());
    }

    #[test]
    fn test_nothing_moving() {
        let scene = vec![shape(1, 0.0, 0.0)];
        assert!(gather(&[], &[], &scene, &viewport(), 8.0).is_none());
    }

    #[test]
    fn test_threshold_widens_bands() {
        let moving = shape(0, 400.0, 400.0);
        // 5 units below the selection's bottom edge
        let near_row = shape(1, 100.0, 455.0);
        let scene = vec![moving.clone(), near_row];

        let (_, wide) =
            gather(&[moving.clone()], &[], &scene, &viewport(), 8.0)
                .expect("moving selection is not empty");
        assert_eq!(wide.horizontal_band.len(), 1);

        let (_, narrow) = gather(&[moving], &[], &scene, &viewport(), 4.0)
            .expect("moving selection is not empty");
        assert!(narrow.horizontal_band.is_empty());
    }
}
