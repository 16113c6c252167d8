//! Equal-spacing ("distribution") alignment
//!
//! Looks for a pair of neighbours in the subject's row (or column) and a
//! spot for the subject that makes the gaps on both sides equal: centered
//! between the pair, or continuing the pair's spacing on either side. Once a
//! pair wins, the row is walked outwards from it to find every further
//! neighbour separated by the same spacing, so the whole run of equal gaps
//! gets a tick mark.
//!
//! Horizontal and vertical distribution are the same algorithm with the axes
//! swapped, so everything here is written against [`Axis`].

use kurbo::Point;

use super::guides::GuideLine;
use crate::core::settings::DISTRIBUTION_LINE_OFFSET;
use crate::geometry::{almost_equal, Bound};

/// The axis along which gaps are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Elements side by side in a row, gaps measured along x.
    Horizontal,
    /// Elements stacked in a column, gaps measured along y.
    Vertical,
}

impl Axis {
    fn min(self, bound: &Bound) -> f64 {
        match self {
            Axis::Horizontal => bound.min_x(),
            Axis::Vertical => bound.min_y(),
        }
    }

    fn max(self, bound: &Bound) -> f64 {
        match self {
            Axis::Horizontal => bound.max_x(),
            Axis::Vertical => bound.max_y(),
        }
    }

    fn center(self, bound: &Bound) -> f64 {
        match self {
            Axis::Horizontal => bound.center_x(),
            Axis::Vertical => bound.center_y(),
        }
    }

    fn size(self, bound: &Bound) -> f64 {
        match self {
            Axis::Horizontal => bound.w,
            Axis::Vertical => bound.h,
        }
    }

    fn cross_extents(self, bound: &Bound) -> [f64; 2] {
        match self {
            Axis::Horizontal => [bound.min_y(), bound.max_y()],
            Axis::Vertical => [bound.min_x(), bound.max_x()],
        }
    }

    /// Both bounds share the cross-axis range, so they can sit in the same
    /// row or column.
    fn crosses(self, a: &Bound, b: &Bound) -> bool {
        match self {
            Axis::Horizontal => a.crosses_horizontally(b),
            Axis::Vertical => a.crosses_vertically(b),
        }
    }

    fn gap(self, a: &Bound, b: &Bound) -> f64 {
        match self {
            Axis::Horizontal => a.horizontal_distance(b),
            Axis::Vertical => a.vertical_distance(b),
        }
    }

    /// A point given as (position along the axis, position across it).
    fn point(self, main: f64, cross: f64) -> Point {
        match self {
            Axis::Horizontal => Point::new(main, cross),
            Axis::Vertical => Point::new(cross, main),
        }
    }
}

/// Winning equal-spacing placement on one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionMatch {
    /// Correction to apply along the axis.
    pub delta: f64,
    /// The repeated gap size.
    pub spacing: f64,
    pub guides: Vec<GuideLine>,
}

struct Best {
    left: usize,
    right: usize,
    delta: f64,
    spacing: f64,
    guides: [GuideLine; 2],
}

fn sorted<const N: usize>(mut values: [f64; N]) -> [f64; N] {
    values.sort_by(f64::total_cmp);
    values
}

/// Cross-axis coordinate halfway through the overlap of two neighbours.
fn middle_of_overlap(axis: Axis, a: &Bound, b: &Bound) -> f64 {
    let [a0, a1] = axis.cross_extents(a);
    let [b0, b1] = axis.cross_extents(b);
    let cs = sorted([a0, a1, b0, b1]);
    (cs[1] + cs[2]) / 2.0
}

/// Find the best equal-spacing placement for `subject` among `band`.
///
/// `band` is the candidate group gathered for this axis; only members that
/// share the subject's row/column are considered. Returns `None` when no
/// placement lies within `threshold`.
pub fn solve(
    axis: Axis,
    subject: &Bound,
    band: &[Bound],
    threshold: f64,
    zoom: f64,
) -> Option<DistributionMatch> {
    let mut boxes: Vec<Bound> = band
        .iter()
        .filter(|b| axis.crosses(b, subject))
        .copied()
        .collect();
    boxes.sort_by(|a, b| axis.center(a).total_cmp(&axis.center(b)));

    let subject_center = axis.center(subject);
    let subject_size = axis.size(subject);
    let offset = DISTRIBUTION_LINE_OFFSET / zoom;

    let mut min = f64::INFINITY;
    let mut average_distance = f64::MAX;
    let mut best: Option<Best> = None;

    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            if !axis.crosses(&boxes[i], &boxes[j])
                || boxes[i].intersects(&boxes[j])
            {
                continue;
            }

            let (left, right) =
                if axis.max(&boxes[j]) < axis.min(&boxes[i]) {
                    (j, i)
                } else {
                    (i, j)
                };
            let lb = boxes[left];
            let rb = boxes[right];
            let gap = axis.min(&rb) - axis.max(&lb);

            let between = (axis.gap(&lb, &rb) > subject_size)
                .then(|| (axis.max(&lb) + axis.min(&rb)) / 2.0);
            let before = axis.min(&lb) - gap - subject_size / 2.0;
            let after = axis.max(&rb) + gap + subject_size / 2.0;

            for placement in between.into_iter().chain([before, after]) {
                let dif = (subject_center - placement).abs();
                let pair_distance = ((axis.center(&lb) - subject_center).abs()
                    + (axis.center(&rb) - subject_center).abs())
                    / 2.0;

                if dif > threshold
                    || !(dif < min
                        || (almost_equal(dif, min)
                            && pair_distance < average_distance))
                {
                    continue;
                }

                min = dif;
                average_distance = pair_distance;

                let cross = middle_of_overlap(axis, &lb, &rb);
                let mains = sorted([
                    placement - subject_size / 2.0,
                    placement + subject_size / 2.0,
                    axis.min(&rb),
                    axis.max(&rb),
                    axis.min(&lb),
                    axis.max(&lb),
                ]);

                best = Some(Best {
                    left,
                    right,
                    delta: placement - subject_center,
                    spacing: mains[2] - mains[1],
                    guides: [
                        GuideLine::distribution(
                            axis.point(mains[1] + offset, cross),
                            axis.point(mains[2] - offset, cross),
                        ),
                        GuideLine::distribution(
                            axis.point(mains[3] + offset, cross),
                            axis.point(mains[4] - offset, cross),
                        ),
                    ],
                });
            }
        }
    }

    let best = best?;
    let mut guides = best.guides.to_vec();
    guides.extend(chain(axis, &boxes, best.left, best.right, best.spacing));

    log::trace!(
        "{:?} distribution: delta {:.2}, spacing {:.2}, {} guides",
        axis,
        best.delta,
        best.spacing,
        guides.len()
    );

    Some(DistributionMatch {
        delta: best.delta,
        spacing: best.spacing,
        guides,
    })
}

/// Walk away from the winning pair in both directions, collecting a guide
/// for every further neighbour that keeps the same spacing.
fn chain(
    axis: Axis,
    boxes: &[Bound],
    left: usize,
    right: usize,
    spacing: f64,
) -> Vec<GuideLine> {
    let mut guides = Vec::new();

    let mut current = boxes[left];
    for candidate in boxes[..left].iter().rev() {
        if almost_equal(axis.max(candidate), axis.min(&current) - spacing) {
            let cross = middle_of_overlap(axis, candidate, &current);
            guides.push(GuideLine::distribution(
                axis.point(axis.max(candidate), cross),
                axis.point(axis.min(&current), cross),
            ));
            current = *candidate;
        }
    }

    let mut current = boxes[right];
    for candidate in &boxes[right + 1..] {
        if almost_equal(axis.min(candidate), axis.max(&current) + spacing) {
            let cross = middle_of_overlap(axis, candidate, &current);
            guides.push(GuideLine::distribution(
                axis.point(axis.max(&current), cross),
                axis.point(axis.min(candidate), cross),
            ));
            current = *candidate;
        }
    }

    guides
}
