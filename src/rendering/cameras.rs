//! Camera system for the canvas
//!
//! The canvas camera doubles as the viewport provider for snapping: its
//! orthographic scale gives the zoom level and its visible area gives the
//! viewport bounds used to size the candidate query windows.
//!
//! Camera controls include panning and zooming with the mouse (PanCam) and
//! keyboard zoom shortcuts.

use crate::canvas::elements::CanvasElement;
use crate::core::settings::{
    KEYBOARD_ZOOM_STEP, MAX_ALLOWED_ZOOM_SCALE, MIN_ALLOWED_ZOOM_SCALE,
};
use crate::geometry::Bound;
use crate::snapping::ViewportState;
use bevy::prelude::*;
use bevy_pancam::*;

// Fraction of the window the scene should fill after centering
const MAX_ZOOM_PERCENTAGE: f32 = 0.9;

//------------------------------------------------------------------------------
// Camera Components
//------------------------------------------------------------------------------

/// Component that marks the canvas camera
#[derive(Component)]
pub struct CanvasCamera;

/// Plugin for the canvas camera and its controls
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanCamPlugin)
            .add_systems(Startup, setup_camera)
            .add_systems(PostStartup, center_camera_on_scene)
            .add_systems(Update, handle_zoom_hotkeys);
    }
}

//------------------------------------------------------------------------------
// Camera Setup Functions
//------------------------------------------------------------------------------

fn setup_camera(mut commands: Commands) {
    spawn_canvas_camera(&mut commands);
}

/// Spawns the canvas camera
///
/// Left mouse is reserved for dragging elements, so PanCam only grabs with
/// the right and middle buttons.
pub fn spawn_canvas_camera(commands: &mut Commands) {
    commands.spawn((
        Camera2d,
        CanvasCamera,
        PanCam {
            grab_buttons: vec![MouseButton::Right, MouseButton::Middle],
            ..default()
        },
    ));
}

//------------------------------------------------------------------------------
// Viewport
//------------------------------------------------------------------------------

/// Current zoom and visible canvas area, read from the camera
///
/// Returns `None` if the camera is missing or not orthographic.
pub fn camera_viewport(
    projection: &Projection,
    transform: &GlobalTransform,
) -> Option<ViewportState> {
    let Projection::Orthographic(ortho) = projection else {
        return None;
    };

    let offset = transform.translation().truncate();
    let min = ortho.area.min + offset;
    let max = ortho.area.max + offset;
    let bounds = Bound::from_extents(
        min.x as f64,
        min.y as f64,
        max.x as f64,
        max.y as f64,
    );

    Some(ViewportState::new(1.0 / ortho.scale as f64, bounds))
}

//------------------------------------------------------------------------------
// Camera Control System
//------------------------------------------------------------------------------

/// Handles Cmd+Plus and Cmd+Minus for zooming in and out
fn handle_zoom_hotkeys(
    mut camera_query: Query<&mut Projection, With<CanvasCamera>>,
    keys: Res<ButtonInput<KeyCode>>,
) {
    // Check for Command/Control modifier key (works on both macOS and Windows/Linux)
    let cmd_ctrl_pressed = keys.pressed(KeyCode::SuperLeft)
        || keys.pressed(KeyCode::SuperRight)
        || keys.pressed(KeyCode::ControlLeft)
        || keys.pressed(KeyCode::ControlRight);

    if !cmd_ctrl_pressed {
        return;
    }

    if keys.just_pressed(KeyCode::Equal) {
        zoom_camera(&mut camera_query, true);
    }

    if keys.just_pressed(KeyCode::Minus) {
        zoom_camera(&mut camera_query, false);
    }
}

/// Zooms the camera in or out based on the given direction
fn zoom_camera(
    camera_query: &mut Query<&mut Projection, With<CanvasCamera>>,
    zoom_in: bool,
) {
    let Ok(mut projection) = camera_query.single_mut() else {
        return;
    };
    let Projection::Orthographic(ortho) = projection.as_mut() else {
        return;
    };

    let old_scale = ortho.scale;
    ortho.scale = step_zoom_scale(old_scale, zoom_in);

    if ortho.scale == old_scale {
        let limit_type = if zoom_in { "minimum" } else { "maximum" };
        info!("Camera already at {} zoom limit", limit_type);
    } else {
        info!("Zoomed to scale {:.3}", ortho.scale);
    }
}

/// Next camera scale for one zoom keystroke, clamped to the allowed range
///
/// Smaller scale means more zoomed in.
pub fn step_zoom_scale(scale: f32, zoom_in: bool) -> f32 {
    if zoom_in {
        (scale * KEYBOARD_ZOOM_STEP).max(MIN_ALLOWED_ZOOM_SCALE)
    } else {
        (scale / KEYBOARD_ZOOM_STEP).min(MAX_ALLOWED_ZOOM_SCALE)
    }
}

//------------------------------------------------------------------------------
// Camera Positioning Functions
//------------------------------------------------------------------------------

/// Centers the camera on the loaded scene and zooms to fit it
fn center_camera_on_scene(
    elements: Query<&CanvasElement>,
    mut camera_query: Query<(&mut Transform, &mut Projection), With<CanvasCamera>>,
    windows: Query<&Window>,
) {
    let Some(bounds) = Bound::union_all(elements.iter().map(|e| e.bound)) else {
        info!("Cannot center camera: scene is empty");
        return;
    };

    let Ok(window) = windows.single() else {
        warn!("Cannot center camera: window not available");
        return;
    };

    let Ok((mut transform, mut projection)) = camera_query.single_mut() else {
        warn!("Cannot center camera: canvas camera not found");
        return;
    };

    transform.translation.x = bounds.center_x() as f32;
    transform.translation.y = bounds.center_y() as f32;

    if let Projection::Orthographic(ortho) = projection.as_mut() {
        let fit = fit_scale(&bounds, window.width(), window.height());
        ortho.scale = fit.clamp(MIN_ALLOWED_ZOOM_SCALE, MAX_ALLOWED_ZOOM_SCALE);
        info!(
            "Centered camera on scene at ({:.1}, {:.1}) with scale {:.3}",
            transform.translation.x, transform.translation.y, ortho.scale
        );
    }
}

/// Camera scale that fits `bounds` into a window of the given size
fn fit_scale(bounds: &Bound, window_width: f32, window_height: f32) -> f32 {
    let width = (bounds.w as f32).max(1.0);
    let height = (bounds.h as f32).max(1.0);
    let zoom = (window_width / width).min(window_height / height)
        * MAX_ZOOM_PERCENTAGE;
    1.0 / zoom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_steps_are_clamped() {
        assert!(step_zoom_scale(1.0, true) < 1.0);
        assert!(step_zoom_scale(1.0, false) > 1.0);
        assert_eq!(
            step_zoom_scale(MIN_ALLOWED_ZOOM_SCALE, true),
            MIN_ALLOWED_ZOOM_SCALE
        );
        assert_eq!(
            step_zoom_scale(MAX_ALLOWED_ZOOM_SCALE, false),
            MAX_ALLOWED_ZOOM_SCALE
        );
    }

    #[test]
    fn test_viewport_from_orthographic_camera() {
        let mut ortho = OrthographicProjection::default_2d();
        ortho.scale = 0.5;
        ortho.area = Rect::new(-200.0, -100.0, 200.0, 100.0);
        let projection = Projection::Orthographic(ortho);
        let transform =
            GlobalTransform::from(Transform::from_xyz(50.0, 20.0, 0.0));

        let viewport =
            camera_viewport(&projection, &transform).expect("orthographic");
        assert_eq!(viewport.zoom, 2.0);
        assert_eq!(viewport.bounds, Bound::new(-150.0, -80.0, 400.0, 200.0));
    }

    #[test]
    fn test_fit_scale_uses_limiting_dimension() {
        let wide = Bound::new(0.0, 0.0, 900.0, 100.0);
        // width limited: 1000 / 900 * 0.9 = 1.0
        assert!((fit_scale(&wide, 1000.0, 800.0) - 1.0).abs() < 1e-5);
    }
}
