//! Guide lines produced by the alignment solvers

use kurbo::Point;

/// How a guide line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuideKind {
    /// An edge or center of the subject lines up with a candidate.
    Point,
    /// One of a row/column of equal gaps.
    Distribution,
}

/// A segment explaining why a snap happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub from: Point,
    pub to: Point,
    pub kind: GuideKind,
}

impl GuideLine {
    pub fn point(from: Point, to: Point) -> GuideLine {
        GuideLine {
            from,
            to,
            kind: GuideKind::Point,
        }
    }

    pub fn distribution(from: Point, to: Point) -> GuideLine {
        GuideLine {
            from,
            to,
            kind: GuideKind::Distribution,
        }
    }

    /// Both endpoints share the same x coordinate.
    pub fn is_vertical(&self) -> bool {
        self.from.x == self.to.x
    }
}
