//! Snapping and alignment guides for a 2D canvas editor, with a Bevy host.

pub mod canvas;
pub mod core;
pub mod geometry;
pub mod rendering;
pub mod snapping;
pub mod utils;
