//! Drag gestures with snapping
//!
//! Pressing the left button on an element starts a gesture: the selection is
//! resolved, a fresh `SnapEngine` gathers candidates once, and the original
//! bounds of everything that moves are recorded. Every pointer move proposes
//! a new position from the total pointer delta, asks the engine for a
//! correction and applies the corrected offset. Releasing the button ends
//! the gesture and drops the engine; Escape puts everything back.

use bevy::input::ButtonInput;
use bevy::prelude::*;
use std::collections::HashMap;

use super::elements::{topmost_at, CanvasElement, ElementRef, Selected};
use crate::core::io::pointer::PointerInfo;
use crate::core::settings::SnapSettings;
use crate::geometry::{Bound, Point};
use crate::rendering::cameras::{camera_viewport, CanvasCamera};
use crate::snapping::{Alignment, GuideLine, SnapEngine, Viewport};

/// State of the drag gesture in progress, if any
#[derive(Resource, Default)]
pub struct GestureController {
    active: Option<ActiveGesture>,
}

/// One drag, from pointer-down to pointer-up
#[derive(Debug)]
pub struct ActiveGesture {
    engine: SnapEngine,
    start_pointer: Point,
    /// Union of the moving bounds when the gesture started
    start_subject: Bound,
    original_bounds: HashMap<Entity, Bound>,
    /// Whether the last move was snapped; guides are hidden otherwise
    snapped: bool,
    last_alignment: Alignment,
}

impl ActiveGesture {
    pub fn last_alignment(&self) -> Alignment {
        self.last_alignment
    }

    pub fn engine(&self) -> &SnapEngine {
        &self.engine
    }
}

impl GestureController {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveGesture> {
        self.active.as_ref()
    }

    /// Start a gesture moving `moving`, snapping against the rest of `index`
    ///
    /// Any gesture already in progress is dropped first. Returns `false` when
    /// there is nothing to move.
    pub fn begin<V: Viewport>(
        &mut self,
        moving: &[ElementRef],
        index: &[ElementRef],
        viewport: &V,
        pointer: Point,
        threshold_px: f64,
    ) -> bool {
        self.end();
        if moving.is_empty() {
            return false;
        }

        let mut engine = SnapEngine::with_threshold(threshold_px);
        let start_subject =
            engine.set_moving_elements(moving, &[], index, viewport);

        self.active = Some(ActiveGesture {
            engine,
            start_pointer: pointer,
            start_subject,
            original_bounds: moving
                .iter()
                .map(|element| (element.entity, element.bound))
                .collect(),
            snapped: false,
            last_alignment: Alignment::NONE,
        });
        true
    }

    /// Move the selection with the pointer
    ///
    /// Returns the new bound of every moving element, or `None` when no
    /// gesture is active.
    pub fn drag<V: Viewport>(
        &mut self,
        pointer: Point,
        viewport: &V,
        snapping: bool,
    ) -> Option<Vec<(Entity, Bound)>> {
        let gesture = self.active.as_mut()?;

        let delta = pointer - gesture.start_pointer;
        let proposed = gesture.start_subject.translate(delta.x, delta.y);

        let alignment = if snapping {
            gesture.engine.align(proposed, viewport)
        } else {
            Alignment::NONE
        };
        gesture.snapped = snapping;
        gesture.last_alignment = alignment;

        let dx = delta.x + alignment.dx;
        let dy = delta.y + alignment.dy;
        Some(
            gesture
                .original_bounds
                .iter()
                .map(|(&entity, bound)| (entity, bound.translate(dx, dy)))
                .collect(),
        )
    }

    /// Finish the gesture and drop its engine
    pub fn end(&mut self) -> bool {
        match self.active.take() {
            Some(mut gesture) => {
                gesture.engine.clear();
                true
            }
            None => false,
        }
    }

    /// Abort the gesture, returning the bounds to restore
    pub fn cancel(&mut self) -> Option<HashMap<Entity, Bound>> {
        let mut gesture = self.active.take()?;
        gesture.engine.clear();
        Some(gesture.original_bounds)
    }

    /// Guides to draw for the current frame
    pub fn guide_lines(&self) -> &[GuideLine] {
        match &self.active {
            Some(gesture) if gesture.snapped => gesture.engine.guide_lines(),
            _ => &[],
        }
    }
}

fn shift_pressed(keys: &ButtonInput<KeyCode>) -> bool {
    keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight)
}

fn alt_pressed(keys: &ButtonInput<KeyCode>) -> bool {
    keys.pressed(KeyCode::AltLeft) || keys.pressed(KeyCode::AltRight)
}

/// Resolves the selection on left press and starts a gesture
#[allow(clippy::too_many_arguments)]
pub fn begin_gesture(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    pointer_info: Res<PointerInfo>,
    settings: Res<SnapSettings>,
    mut controller: ResMut<GestureController>,
    elements: Query<(Entity, &CanvasElement, Has<Selected>)>,
    camera_query: Query<(&Projection, &GlobalTransform), With<CanvasCamera>>,
) {
    if !mouse.just_pressed(MouseButton::Left) || !pointer_info.seen {
        return;
    }

    let pointer = pointer_info.canvas;
    let additive = shift_pressed(&keys);
    let hit = topmost_at(pointer, elements.iter().map(|(e, el, _)| (e, el)));

    let Some(hit) = hit else {
        if !additive {
            for (entity, _, selected) in &elements {
                if selected {
                    commands.entity(entity).remove::<Selected>();
                }
            }
        }
        return;
    };

    let hit_selected = elements
        .get(hit)
        .map(|(_, _, selected)| selected)
        .unwrap_or(false);

    // Commands are deferred, so work out the new selection here as well
    let mut selection: Vec<Entity> = Vec::new();
    if additive || hit_selected {
        selection.extend(
            elements
                .iter()
                .filter(|(_, _, selected)| *selected)
                .map(|(entity, _, _)| entity),
        );
    } else {
        for (entity, _, selected) in &elements {
            if selected {
                commands.entity(entity).remove::<Selected>();
            }
        }
    }
    if !selection.contains(&hit) {
        selection.push(hit);
        commands.entity(hit).insert(Selected);
    }

    let Some(viewport) = camera_query
        .single()
        .ok()
        .and_then(|(projection, transform)| camera_viewport(projection, transform))
    else {
        warn!("Cannot start drag: canvas camera not available");
        return;
    };

    let index: Vec<ElementRef> = elements
        .iter()
        .map(|(entity, element, _)| ElementRef::new(entity, element))
        .collect();
    let moving: Vec<ElementRef> = index
        .iter()
        .filter(|element| selection.contains(&element.entity))
        .copied()
        .collect();

    if controller.begin(
        &moving,
        &index,
        &viewport,
        pointer,
        settings.align_threshold,
    ) {
        debug!("Started dragging {} element(s)", moving.len());
    }
}

/// Moves the selection while the left button is held
pub fn drag_gesture(
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    pointer_info: Res<PointerInfo>,
    settings: Res<SnapSettings>,
    mut controller: ResMut<GestureController>,
    mut elements: Query<&mut CanvasElement>,
    camera_query: Query<(&Projection, &GlobalTransform), With<CanvasCamera>>,
) {
    if !controller.is_active() || !mouse.pressed(MouseButton::Left) {
        return;
    }
    if !pointer_info.is_changed() && !keys.is_changed() {
        return;
    }

    let Some(viewport) = camera_query
        .single()
        .ok()
        .and_then(|(projection, transform)| camera_viewport(projection, transform))
    else {
        return;
    };

    let snapping = settings.enabled && !alt_pressed(&keys);
    let Some(moved) =
        controller.drag(pointer_info.canvas, &viewport, snapping)
    else {
        return;
    };

    for (entity, bound) in moved {
        if let Ok(mut element) = elements.get_mut(entity) {
            element.bound = bound;
        }
    }
}

/// Ends the gesture on left release
pub fn end_gesture(
    mouse: Res<ButtonInput<MouseButton>>,
    mut controller: ResMut<GestureController>,
) {
    if mouse.just_released(MouseButton::Left) && controller.end() {
        debug!("Finished drag");
    }
}

/// Escape aborts the gesture and restores the original bounds
pub fn cancel_gesture(
    keys: Res<ButtonInput<KeyCode>>,
    mut controller: ResMut<GestureController>,
    mut elements: Query<&mut CanvasElement>,
) {
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }
    let Some(originals) = controller.cancel() else {
        return;
    };

    for (entity, bound) in originals {
        if let Ok(mut element) = elements.get_mut(entity) {
            element.bound = bound;
        }
    }
    info!("Drag cancelled");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::scene::ElementKind;
    use crate::snapping::ViewportState;

    fn element(id: u32, x: f64, y: f64) -> ElementRef {
        ElementRef {
            entity: Entity::from_raw(id),
            bound: Bound::new(x, y, 100.0, 100.0),
            kind: ElementKind::Shape,
        }
    }

    fn viewport(zoom: f64) -> ViewportState {
        ViewportState::new(zoom, Bound::new(-1000.0, -1000.0, 3000.0, 3000.0))
    }

    #[test]
    fn test_drag_snaps_to_neighbour_edge() {
        let moving = element(1, 200.0, 300.0);
        let anchor = element(2, 0.0, 300.0);
        let index = vec![moving, anchor];

        let mut controller = GestureController::default();
        assert!(controller.begin(
            &[moving],
            &index,
            &viewport(1.0),
            Point::new(250.0, 350.0),
            8.0
        ));

        // Pointer moves the subject to x=104, 4 past the anchor's right edge
        let moved = controller
            .drag(Point::new(154.0, 350.0), &viewport(1.0), true)
            .expect("gesture is active");
        assert_eq!(
            moved,
            vec![(moving.entity, Bound::new(100.0, 300.0, 100.0, 100.0))]
        );
        assert_eq!(
            controller.active().map(|g| g.last_alignment().dx),
            Some(-4.0)
        );
        assert!(!controller.guide_lines().is_empty());
    }

    #[test]
    fn test_drag_without_snapping_follows_pointer() {
        let moving = element(1, 200.0, 300.0);
        let index = vec![moving, element(2, 0.0, 0.0)];

        let mut controller = GestureController::default();
        controller.begin(&[moving], &index, &viewport(1.0), Point::ZERO, 8.0);

        let moved = controller
            .drag(Point::new(-96.0, 0.0), &viewport(1.0), false)
            .expect("gesture is active");
        assert_eq!(moved[0].1.x, 104.0);
        assert!(controller.guide_lines().is_empty());
    }

    #[test]
    fn test_cancel_returns_original_bounds() {
        let moving = element(1, 200.0, 300.0);
        let index = vec![moving];

        let mut controller = GestureController::default();
        controller.begin(&[moving], &index, &viewport(1.0), Point::ZERO, 8.0);
        controller.drag(Point::new(40.0, 40.0), &viewport(1.0), true);

        let originals = controller.cancel().expect("gesture is active");
        assert_eq!(originals.get(&moving.entity), Some(&moving.bound));
        assert!(!controller.is_active());
        assert!(controller.drag(Point::ZERO, &viewport(1.0), true).is_none());
    }

    #[test]
    fn test_nothing_to_move() {
        let mut controller = GestureController::default();
        assert!(!controller.begin(&[], &[], &viewport(1.0), Point::ZERO, 8.0));
        assert!(!controller.is_active());
        assert!(!controller.end());
    }
}
