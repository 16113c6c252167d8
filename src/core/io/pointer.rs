//! Pointer position on the canvas
//!
//! The cursor is converted to canvas coordinates once per frame, before any
//! gesture system reads it. When the cursor leaves the window the last known
//! position is kept, so a drag that strays outside keeps its anchor.

use crate::geometry::Point;
use crate::rendering::cameras::CanvasCamera;
use bevy::prelude::*;

/// Where the pointer is, in window pixels and in canvas units
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PointerInfo {
    pub screen: Vec2,
    /// Same space as element bounds
    pub canvas: Point,
    /// False until the cursor has been over the window once
    pub seen: bool,
}

impl Default for PointerInfo {
    fn default() -> Self {
        Self {
            screen: Vec2::ZERO,
            canvas: Point::ZERO,
            seen: false,
        }
    }
}

impl PointerInfo {
    /// Record a new cursor sample
    pub fn track(&mut self, screen: Vec2, world: Vec2) {
        self.screen = screen;
        self.canvas = Point::new(world.x as f64, world.y as f64);
        self.seen = true;
    }
}

/// Plugin that keeps `PointerInfo` current
pub struct PointerPlugin;

impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerInfo>()
            .add_systems(Update, update_pointer_position);
    }
}

/// Projects the window cursor through the canvas camera
pub fn update_pointer_position(
    mut pointer_info: ResMut<PointerInfo>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<CanvasCamera>>,
) {
    let (Ok(window), Ok((camera, camera_transform))) =
        (windows.single(), camera_query.single())
    else {
        return;
    };
    let Some(screen) = window.cursor_position() else {
        return;
    };

    match camera.viewport_to_world_2d(camera_transform, screen) {
        Ok(world) => pointer_info.track(screen, world),
        Err(err) => trace!("Pointer outside the camera viewport: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_converts_to_canvas_units() {
        let mut pointer = PointerInfo::default();
        assert!(!pointer.seen);

        pointer.track(Vec2::new(10.0, 20.0), Vec2::new(-150.5, 42.0));
        assert!(pointer.seen);
        assert_eq!(pointer.screen, Vec2::new(10.0, 20.0));
        assert_eq!(pointer.canvas, Point::new(-150.5, 42.0));
    }
}
