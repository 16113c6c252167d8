//! Axis-aligned bounds in canvas (model) space
//!
//! `Bound` is the rectangle every snapping computation works on. It is a
//! small `Copy` value that is created fresh for every query and frame, and
//! never mutated in place. Arithmetic that kurbo already does well (union,
//! inflation) is delegated to `kurbo::Rect`.

use std::fmt;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Tolerance used by [`almost_equal`].
pub const EPSILON: f64 = 1e-4;

/// Tolerance used by [`Bound::intersects`], so that boxes which merely touch
/// count as overlapping.
pub const INTERSECT_EPSILON: f64 = 0.01;

/// Float comparison used everywhere instead of `==`.
///
/// Repeated transforms leave noise in the low bits, so exact equality would
/// make tie detection flaky.
#[inline]
pub fn almost_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// An axis-aligned rectangle with its origin at `(x, y)`.
///
/// Width and height are expected to be non-negative; a negative size is a
/// caller bug.
#[derive(Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Bound {
    pub const ZERO: Bound = Bound {
        x: 0.0,
        y: 0.0,
        w: 0.0,
        h: 0.0,
    };

    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Bound {
        debug_assert!(w >= 0.0 && h >= 0.0, "negative bound size {w}x{h}");
        Bound { x, y, w, h }
    }

    /// Build a bound from its min/max extents.
    pub fn from_extents(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Bound {
        Bound::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Union of every bound in the iterator, `None` when it is empty.
    pub fn union_all<I>(bounds: I) -> Option<Bound>
    where
        I: IntoIterator<Item = Bound>,
    {
        bounds.into_iter().reduce(|acc, bound| acc.union(&bound))
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.w
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f64 {
        self.y + self.h / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Smallest bound covering both `self` and `other`.
    pub fn union(&self, other: &Bound) -> Bound {
        Bound::from(self.to_rect().union(other.to_rect()))
    }

    /// Grow the bound by `margin` on every side.
    pub fn expand(&self, margin: f64) -> Bound {
        Bound::from(self.to_rect().inflate(margin, margin))
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Bound {
        Bound::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Overlap on both axes. Touching edges count as overlapping.
    pub fn intersects(&self, other: &Bound) -> bool {
        other.max_x() > self.min_x() - INTERSECT_EPSILON
            && other.max_y() > self.min_y() - INTERSECT_EPSILON
            && other.min_x() < self.max_x() + INTERSECT_EPSILON
            && other.min_y() < self.max_y() + INTERSECT_EPSILON
    }

    /// The vertical ranges overlap, i.e. both bounds sit at the same height
    /// and can take part in a horizontal row.
    pub fn crosses_horizontally(&self, other: &Bound) -> bool {
        !(self.max_y() < other.min_y() || self.min_y() > other.max_y())
    }

    /// The horizontal ranges overlap, i.e. both bounds can take part in a
    /// vertical column.
    pub fn crosses_vertically(&self, other: &Bound) -> bool {
        !(self.max_x() < other.min_x() || self.min_x() > other.max_x())
    }

    /// Smallest gap between facing vertical edges.
    pub fn horizontal_distance(&self, other: &Bound) -> f64 {
        (self.min_x() - other.max_x())
            .abs()
            .min((self.max_x() - other.min_x()).abs())
    }

    /// Smallest gap between facing horizontal edges.
    pub fn vertical_distance(&self, other: &Bound) -> f64 {
        (self.min_y() - other.max_y())
            .abs()
            .min((self.max_y() - other.min_y()).abs())
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(self.min_x(), self.min_y(), self.max_x(), self.max_y())
    }
}

impl From<Rect> for Bound {
    fn from(rect: Rect) -> Bound {
        let rect = rect.abs();
        Bound::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

impl From<Bound> for Rect {
    fn from(bound: Bound) -> Rect {
        bound.to_rect()
    }
}

impl fmt::Debug for Bound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Bound<{} {} {}x{}>", self.x, self.y, self.w, self.h)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "x: {:.1}, y: {:.1}, w: {:.1}, h: {:.1}",
            self.x, self.y, self.w, self.h
        )
    }
}
