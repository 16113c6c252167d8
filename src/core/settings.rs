// Settings ///////////////////////////////////////////////////////////////////
// This module contains all the settings for the app.

use bevy::prelude::*;

// Snapping ///////////////////////////////////////////////////////////////////

/// Snap distance in screen pixels. Divided by the zoom level to get the
/// distance in canvas units.
pub const ALIGN_THRESHOLD: f64 = 8.0;

/// Inset (in screen pixels) at both ends of the two distribution guides
/// around the moving selection
pub const DISTRIBUTION_LINE_OFFSET: f64 = 1.0;

/// Half-length (in screen pixels) of the end-cap ticks on distribution guides
pub const DISTRIBUTION_END_CAP: f64 = 10.0;

/// Guide stroke width in screen pixels
pub const GUIDE_STROKE_WIDTH: f32 = 2.0;

/// Point guide color, #8B5CF6
pub const POINT_GUIDE_COLOR: Color = Color::srgb(0.545, 0.361, 0.965);

/// Distribution guide color, #CC4187
pub const DISTRIBUTION_GUIDE_COLOR: Color = Color::srgb(0.8, 0.255, 0.529);

// Camera Zoom Settings ///////////////////////////////////////////////////////

/// The step multiplier for zooming when using keyboard shortcuts (Cmd++ / Cmd+-)
/// Values closer to 1.0 produce smaller zoom steps, values further from 1.0 produce larger steps
pub const KEYBOARD_ZOOM_STEP: f32 = 0.8; // 0.8 means zoom in by 20% or out by 25% per keystroke

/// Minimum allowed camera scale (maximum zoom in)
pub const MIN_ALLOWED_ZOOM_SCALE: f32 = 0.05;

/// Maximum allowed camera scale (maximum zoom out)
pub const MAX_ALLOWED_ZOOM_SCALE: f32 = 10.0;

// Canvas /////////////////////////////////////////////////////////////////////

/// Canvas background color
pub const BACKGROUND_COLOR: Color = Color::srgb(0.1, 0.1, 0.1);

/// Number of elements per row in the default scene
pub const DEFAULT_SCENE_COLUMNS: usize = 4;

/// Spacing between elements in the default scene
pub const DEFAULT_SCENE_SPACING: f64 = 60.0;

/// Runtime snapping configuration
#[derive(Resource, Debug, Clone)]
pub struct SnapSettings {
    /// Whether dragging snaps at all
    pub enabled: bool,
    /// Snap distance in screen pixels
    pub align_threshold: f64,
    pub point_color: Color,
    pub distribution_color: Color,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            align_threshold: ALIGN_THRESHOLD,
            point_color: POINT_GUIDE_COLOR,
            distribution_color: DISTRIBUTION_GUIDE_COLOR,
        }
    }
}
