//! Geometric Primitives and Operations

pub mod bound;

// Re-export commonly used items
pub use bound::{almost_equal, Bound};
pub use kurbo::Point;
