//! Edge and center alignment against single candidates
//!
//! For every candidate we measure seven signed distances per axis between
//! the subject and the candidate (center to center, center to either edge,
//! and edge to edge). The smallest one within the threshold wins for that
//! candidate. Candidates are visited in order and each match overwrites the
//! axis correction, so the *last* matching candidate decides the snap, not
//! the nearest one. Existing snapping behavior depends on that order.

use kurbo::Point;

use super::guides::GuideLine;
use crate::geometry::{almost_equal, Bound};

/// Number of distances measured per axis.
pub const METRIC_COUNT: usize = 7;

/// The closest distance on one axis and which metrics produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisMatch {
    /// Signed distance to move the subject by.
    pub distance: f64,
    /// Every metric index whose distance ties the minimum.
    pub indices: Vec<usize>,
}

/// Per-axis closest distances between a subject and one candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClosestDistances {
    pub horizontal: Option<AxisMatch>,
    pub vertical: Option<AxisMatch>,
}

/// Result of running the point-alignment pass over all candidates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointAlignment {
    pub dx: f64,
    pub dy: f64,
    pub guides: Vec<GuideLine>,
}

fn x_distances(subject: &Bound, other: &Bound) -> [f64; METRIC_COUNT] {
    [
        other.center_x() - subject.center_x(),
        other.min_x() - subject.center_x(),
        other.max_x() - subject.center_x(),
        other.min_x() - subject.min_x(),
        other.max_x() - subject.min_x(),
        other.min_x() - subject.max_x(),
        other.max_x() - subject.max_x(),
    ]
}

fn y_distances(subject: &Bound, other: &Bound) -> [f64; METRIC_COUNT] {
    [
        other.center_y() - subject.center_y(),
        other.min_y() - subject.center_y(),
        other.max_y() - subject.center_y(),
        other.min_y() - subject.min_y(),
        other.max_y() - subject.min_y(),
        other.min_y() - subject.max_y(),
        other.max_y() - subject.max_y(),
    ]
}

fn closest_on_axis(
    distances: [f64; METRIC_COUNT],
    threshold: f64,
) -> Option<AxisMatch> {
    let magnitudes = distances.map(f64::abs);
    let closest = magnitudes.iter().copied().fold(f64::INFINITY, f64::min);

    if closest > threshold {
        return None;
    }

    let first = magnitudes.iter().position(|&m| m == closest)?;
    let indices = magnitudes
        .iter()
        .enumerate()
        .filter(|(_, m)| almost_equal(**m, closest))
        .map(|(idx, _)| idx)
        .collect();

    Some(AxisMatch {
        distance: distances[first],
        indices,
    })
}

/// Closest edge/center distances between `subject` and `other` on both axes,
/// keeping only axes within `threshold`.
pub fn closest_distances(
    subject: &Bound,
    other: &Bound,
    threshold: f64,
) -> ClosestDistances {
    ClosestDistances {
        horizontal: closest_on_axis(x_distances(subject, other), threshold),
        vertical: closest_on_axis(y_distances(subject, other), threshold),
    }
}

/// Vertical guide lines for a horizontal match.
fn x_guides(
    subject: &Bound,
    other: &Bound,
    horizontal: &AxisMatch,
    vertical: Option<&AxisMatch>,
) -> impl Iterator<Item = GuideLine> {
    let dx = horizontal.distance;
    let positions = [
        other.center_x(),
        other.min_x(),
        other.max_x(),
        subject.min_x() + dx,
        subject.min_x() + dx,
        subject.max_x() + dx,
        subject.max_x() + dx,
    ];

    let dy = vertical.map_or(0.0, |m| m.distance);
    let top = (subject.min_y() + dy).min(other.min_y());
    let bottom = (subject.max_y() + dy).max(other.max_y());

    horizontal.indices.clone().into_iter().map(move |idx| {
        GuideLine::point(
            Point::new(positions[idx], top),
            Point::new(positions[idx], bottom),
        )
    })
}

/// Horizontal guide lines for a vertical match.
fn y_guides(
    subject: &Bound,
    other: &Bound,
    vertical: &AxisMatch,
    horizontal: Option<&AxisMatch>,
) -> impl Iterator<Item = GuideLine> {
    let dy = vertical.distance;
    let positions = [
        other.center_y(),
        other.min_y(),
        other.max_y(),
        subject.min_y() + dy,
        subject.min_y() + dy,
        subject.max_y() + dy,
        subject.max_y() + dy,
    ];

    let dx = horizontal.map_or(0.0, |m| m.distance);
    let left = (subject.min_x() + dx).min(other.min_x());
    let right = (subject.max_x() + dx).max(other.max_x());

    vertical.indices.clone().into_iter().map(move |idx| {
        GuideLine::point(
            Point::new(left, positions[idx]),
            Point::new(right, positions[idx]),
        )
    })
}

/// Run point alignment of `subject` against `candidates` in order.
pub fn solve(
    subject: &Bound,
    candidates: &[Bound],
    threshold: f64,
) -> PointAlignment {
    let mut result = PointAlignment::default();

    for other in candidates {
        let closest = closest_distances(subject, other, threshold);

        if let Some(horizontal) = &closest.horizontal {
            result.dx = horizontal.distance;
            result.guides.extend(x_guides(
                subject,
                other,
                horizontal,
                closest.vertical.as_ref(),
            ));
        }

        if let Some(vertical) = &closest.vertical {
            result.dy = vertical.distance;
            result.guides.extend(y_guides(
                subject,
                other,
                vertical,
                closest.horizontal.as_ref(),
            ));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_to_edge_match() {
        let anchor = Bound::new(0.0, 0.0, 100.0, 100.0);
        let subject = Bound::new(104.0, 300.0, 100.0, 100.0);

        let closest = closest_distances(&subject, &anchor, 8.0);
        let horizontal = closest.horizontal.expect("left edge is 4 away");
        assert_eq!(horizontal.distance, -4.0);
        // left edge of the subject against the right edge of the anchor
        assert_eq!(horizontal.indices, vec![4]);
        assert!(closest.vertical.is_none(), "200 units apart vertically");
    }

    #[test]
    fn test_ties_report_every_metric() {
        // Same width and x: centers and both edge pairs coincide.
        let anchor = Bound::new(0.0, 0.0, 40.0, 40.0);
        let subject = Bound::new(0.0, 200.0, 40.0, 40.0);

        let horizontal = closest_distances(&subject, &anchor, 8.0)
            .horizontal
            .expect("perfectly aligned");
        assert_eq!(horizontal.distance, 0.0);
        assert_eq!(horizontal.indices, vec![0, 3, 6]);

        let result = solve(&subject, &[anchor], 8.0);
        assert_eq!(result.guides.len(), 3, "one guide per tied metric");
        for guide in &result.guides {
            assert!(guide.is_vertical());
            assert_eq!(guide.from.y, 0.0);
            assert_eq!(guide.to.y, 240.0);
        }
    }

    #[test]
    fn test_last_matching_candidate_wins() {
        let subject = Bound::new(100.0, 0.0, 50.0, 50.0);
        // Closer candidate first (1 unit), farther one last (3 units).
        let near = Bound::new(151.0, 500.0, 10.0, 10.0);
        let far = Bound::new(0.0, 900.0, 97.0, 10.0);

        let result = solve(&subject, &[near, far], 8.0);
        assert_eq!(result.dx, -3.0, "later candidate overrides earlier one");

        let reversed = solve(&subject, &[far, near], 8.0);
        assert_eq!(reversed.dx, 1.0);
    }

    #[test]
    fn test_guide_spans_shifted_subject_and_candidate() {
        let anchor = Bound::new(0.0, 0.0, 100.0, 100.0);
        // 3 off on x (right edges), 2 off on y (bottom edges)
        let subject = Bound::new(53.0, 52.0, 50.0, 50.0);

        let result = solve(&subject, &[anchor], 8.0);
        assert_eq!(result.dx, -3.0);
        assert_eq!(result.dy, -2.0);

        let vertical = result
            .guides
            .iter()
            .find(|g| g.is_vertical())
            .expect("x guide");
        assert_eq!(vertical.from, Point::new(100.0, 0.0));
        assert_eq!(vertical.to, Point::new(100.0, 100.0));

        let horizontal = result
            .guides
            .iter()
            .find(|g| !g.is_vertical())
            .expect("y guide");
        assert_eq!(horizontal.from, Point::new(0.0, 100.0));
        assert_eq!(horizontal.to, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_nothing_within_threshold() {
        let anchor = Bound::new(0.0, 0.0, 100.0, 100.0);
        let subject = Bound::new(110.0, 300.0, 100.0, 100.0);
        assert_eq!(solve(&subject, &[anchor], 8.0), PointAlignment::default());
    }
}
