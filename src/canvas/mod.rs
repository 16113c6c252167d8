//! The canvas: scene loading, element entities and drag gestures

pub mod elements;
pub mod gesture;
pub mod scene;

pub use elements::{CanvasElement, ElementRef, Selected};
pub use gesture::GestureController;
pub use scene::{CanvasScene, ElementKind, SceneElement};

use crate::core::io::pointer::update_pointer_position;
use bevy::prelude::*;

/// Plugin that spawns the scene and drives drag gestures
pub struct CanvasPlugin;

impl Plugin for CanvasPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Selected>()
            .init_resource::<CanvasScene>()
            .init_resource::<GestureController>()
            .add_systems(Startup, elements::spawn_scene)
            .add_systems(
                Update,
                (
                    gesture::begin_gesture,
                    gesture::drag_gesture,
                    gesture::end_gesture,
                    gesture::cancel_gesture,
                )
                    .chain()
                    .after(update_pointer_position),
            )
            .add_systems(
                PostUpdate,
                (
                    elements::sync_element_sprites,
                    elements::reset_deselected_sprites,
                )
                    .before(TransformSystem::TransformPropagate),
            );
    }
}
