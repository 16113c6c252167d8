//! Rendering and Visualization
//!
//! This module contains all rendering functionality:
//! - Camera management for viewport control
//! - Snap guide drawing

pub mod cameras;
pub mod guides;

// Re-export commonly used items
pub use cameras::{CameraPlugin, CanvasCamera};
pub use guides::{render_guides, GuideRenderPlugin, GuideSurface};
