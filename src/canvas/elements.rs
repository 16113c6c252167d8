//! Canvas elements as ECS entities
//!
//! Every scene element becomes an entity with a `CanvasElement` component
//! holding its model bound, and a sprite that mirrors it. The bound is the
//! source of truth; sprites follow whenever it changes.

use bevy::prelude::*;
use smol_str::SmolStr;

use super::scene::{CanvasScene, ElementKind};
use crate::geometry::{Bound, Point};
use crate::snapping::SnapElement;

const SHAPE_COLOR: Color = Color::srgb(0.32, 0.34, 0.38);
const SELECTED_SHAPE_COLOR: Color = Color::srgb(0.45, 0.55, 0.75);
const CONNECTOR_COLOR: Color = Color::srgb(0.55, 0.55, 0.55);
const SELECTED_CONNECTOR_COLOR: Color = Color::srgb(0.75, 0.75, 0.85);

/// A shape or connector on the canvas
#[derive(Component, Debug, Clone)]
pub struct CanvasElement {
    pub name: SmolStr,
    pub bound: Bound,
    pub kind: ElementKind,
    /// Stacking order; higher values are drawn on top and hit first
    pub order: u32,
}

/// Marker component for entities that are currently selected
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct Selected;

/// Snapshot of an element for the snap engine, keyed by entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRef {
    pub entity: Entity,
    pub bound: Bound,
    pub kind: ElementKind,
}

impl ElementRef {
    pub fn new(entity: Entity, element: &CanvasElement) -> Self {
        Self {
            entity,
            bound: element.bound,
            kind: element.kind,
        }
    }
}

impl SnapElement for ElementRef {
    type Id = Entity;

    fn id(&self) -> Entity {
        self.entity
    }

    fn bound(&self) -> Bound {
        self.bound
    }

    fn is_alignable(&self) -> bool {
        self.kind.is_alignable()
    }
}

/// Spawns one entity per scene element
pub fn spawn_scene(mut commands: Commands, scene: Res<CanvasScene>) {
    for (order, element) in scene.elements.iter().enumerate() {
        let element = CanvasElement {
            name: element.name.clone(),
            bound: element.bound,
            kind: element.kind,
            order: order as u32,
        };
        commands.spawn((
            Sprite::from_color(
                element_color(element.kind, false),
                sprite_size(&element.bound),
            ),
            element_transform(&element),
            Name::new(element.name.to_string()),
            element,
        ));
    }
    info!("Spawned {} canvas elements", scene.elements.len());
}

/// Keeps sprites in step with element bounds and selection state
#[allow(clippy::type_complexity)]
pub fn sync_element_sprites(
    mut query: Query<
        (&CanvasElement, &mut Sprite, &mut Transform, Has<Selected>),
        Or<(Changed<CanvasElement>, Added<Selected>)>,
    >,
) {
    for (element, mut sprite, mut transform, selected) in &mut query {
        sprite.custom_size = Some(sprite_size(&element.bound));
        sprite.color = element_color(element.kind, selected);
        *transform = element_transform(element);
    }
}

/// Restores the normal color of elements that lost their selection
pub fn reset_deselected_sprites(
    mut removed: RemovedComponents<Selected>,
    mut query: Query<(&CanvasElement, &mut Sprite)>,
) {
    for entity in removed.read() {
        if let Ok((element, mut sprite)) = query.get_mut(entity) {
            sprite.color = element_color(element.kind, false);
        }
    }
}

/// The topmost element under `point`, if any
pub fn topmost_at<'a>(
    point: Point,
    elements: impl IntoIterator<Item = (Entity, &'a CanvasElement)>,
) -> Option<Entity> {
    elements
        .into_iter()
        .filter(|(_, element)| element.bound.contains_point(point))
        .max_by_key(|(_, element)| element.order)
        .map(|(entity, _)| entity)
}

fn element_color(kind: ElementKind, selected: bool) -> Color {
    match (kind, selected) {
        (ElementKind::Shape, false) => SHAPE_COLOR,
        (ElementKind::Shape, true) => SELECTED_SHAPE_COLOR,
        (ElementKind::Connector, false) => CONNECTOR_COLOR,
        (ElementKind::Connector, true) => SELECTED_CONNECTOR_COLOR,
    }
}

fn sprite_size(bound: &Bound) -> Vec2 {
    Vec2::new(bound.w as f32, bound.h as f32)
}

fn element_transform(element: &CanvasElement) -> Transform {
    let center = element.bound.center();
    // Keep later elements above earlier ones
    Transform::from_xyz(
        center.x as f32,
        center.y as f32,
        element.order as f32 * 0.01,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(order: u32, bound: Bound) -> CanvasElement {
        CanvasElement {
            name: SmolStr::new("test"),
            bound,
            kind: ElementKind::Shape,
            order,
        }
    }

    #[test]
    fn test_topmost_hit_wins() {
        let bottom = element(0, Bound::new(0.0, 0.0, 100.0, 100.0));
        let top = element(1, Bound::new(50.0, 50.0, 100.0, 100.0));
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let elements = [(a, &bottom), (b, &top)];

        assert_eq!(topmost_at(Point::new(75.0, 75.0), elements), Some(b));
        assert_eq!(topmost_at(Point::new(10.0, 10.0), elements), Some(a));
        assert_eq!(topmost_at(Point::new(500.0, 500.0), elements), None);
    }

    #[test]
    fn test_connectors_are_not_anchors() {
        let mut connector = element(0, Bound::new(0.0, 0.0, 10.0, 2.0));
        connector.kind = ElementKind::Connector;
        let entity = Entity::from_raw(3);

        let snapshot = ElementRef::new(entity, &connector);
        assert_eq!(snapshot.id(), entity);
        assert!(!snapshot.is_alignable());
    }

    #[test]
    fn test_spawn_scene_creates_entities() {
        let mut app = App::new();
        app.insert_resource(CanvasScene::default_layout())
            .add_systems(Startup, spawn_scene);
        app.update();

        let expected = CanvasScene::default_layout().elements.len();
        let mut query = app.world_mut().query::<&CanvasElement>();
        assert_eq!(query.iter(app.world()).count(), expected);
    }
}
