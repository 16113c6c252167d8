//! Guide line rendering
//!
//! Guides are drawn in canvas space on top of everything else. Point guides
//! are plain segments; distribution guides get a short perpendicular bar at
//! each end so equal gaps read as measured spans.

use bevy::gizmos::config::{GizmoConfig, GizmoConfigGroup, GizmoLineConfig};
use bevy::prelude::*;

use crate::canvas::GestureController;
use crate::core::cli::CliArgs;
use crate::core::settings::{
    SnapSettings, DISTRIBUTION_END_CAP, GUIDE_STROKE_WIDTH,
};
use crate::geometry::{Bound, Point};
use crate::rendering::cameras::CanvasCamera;
use crate::snapping::{GuideKind, GuideLine};

const CANDIDATE_OUTLINE_COLOR: Color = Color::srgba(0.3, 0.8, 0.9, 0.5);

/// Something guide segments can be stroked onto
pub trait GuideSurface {
    fn stroke_segment(&mut self, from: Point, to: Point, kind: GuideKind);
}

/// Stroke `lines` at `zoom`. Does nothing when there are no lines.
pub fn render_guides<S: GuideSurface + ?Sized>(
    lines: &[GuideLine],
    zoom: f64,
    surface: &mut S,
) {
    if lines.is_empty() {
        return;
    }

    let bar = DISTRIBUTION_END_CAP / zoom;
    for line in lines {
        let (from, to) = normalized(line);
        surface.stroke_segment(from, to, line.kind);

        if line.kind == GuideKind::Distribution {
            for end in [from, to] {
                let (a, b) = if line.is_vertical() {
                    (
                        Point::new(end.x - bar, end.y),
                        Point::new(end.x + bar, end.y),
                    )
                } else {
                    (
                        Point::new(end.x, end.y - bar),
                        Point::new(end.x, end.y + bar),
                    )
                };
                surface.stroke_segment(a, b, GuideKind::Distribution);
            }
        }
    }
}

/// Endpoints ordered from min to max along the line's axis
fn normalized(line: &GuideLine) -> (Point, Point) {
    if line.is_vertical() {
        let x = line.from.x;
        (
            Point::new(x, line.from.y.min(line.to.y)),
            Point::new(x, line.from.y.max(line.to.y)),
        )
    } else {
        let y = line.from.y;
        (
            Point::new(line.from.x.min(line.to.x), y),
            Point::new(line.from.x.max(line.to.x), y),
        )
    }
}

//------------------------------------------------------------------------------
// Bevy host
//------------------------------------------------------------------------------

/// Gizmo group for snap guides, with its own line width
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct SnapGuideGizmos;

struct GizmoSurface<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's, SnapGuideGizmos>,
    settings: &'a SnapSettings,
}

impl GuideSurface for GizmoSurface<'_, '_, '_> {
    fn stroke_segment(&mut self, from: Point, to: Point, kind: GuideKind) {
        let color = match kind {
            GuideKind::Point => self.settings.point_color,
            GuideKind::Distribution => self.settings.distribution_color,
        };
        self.gizmos.line_2d(to_vec2(from), to_vec2(to), color);
    }
}

fn to_vec2(point: Point) -> Vec2 {
    Vec2::new(point.x as f32, point.y as f32)
}

fn camera_zoom(projection: &Projection) -> f64 {
    match projection {
        Projection::Orthographic(ortho) => 1.0 / ortho.scale as f64,
        _ => 1.0,
    }
}

/// Draws the guides of the active gesture
pub fn draw_snap_guides(
    mut gizmos: Gizmos<SnapGuideGizmos>,
    controller: Res<GestureController>,
    settings: Res<SnapSettings>,
    camera_query: Query<&Projection, With<CanvasCamera>>,
) {
    let lines = controller.guide_lines();
    if lines.is_empty() {
        return;
    }
    let zoom = camera_query.single().map(camera_zoom).unwrap_or(1.0);

    let mut surface = GizmoSurface {
        gizmos: &mut gizmos,
        settings: &settings,
    };
    render_guides(lines, zoom, &mut surface);
}

/// Outlines the cached candidates of the active gesture (`--debug`)
pub fn draw_candidate_outlines(
    mut gizmos: Gizmos,
    controller: Res<GestureController>,
) {
    let Some(gesture) = controller.active() else {
        return;
    };
    for bound in &gesture.engine().candidates().all {
        outline(&mut gizmos, bound);
    }
}

fn outline(gizmos: &mut Gizmos, bound: &Bound) {
    let center = bound.center();
    gizmos.rect_2d(
        Isometry2d::from_translation(to_vec2(center)),
        Vec2::new(bound.w as f32, bound.h as f32),
        CANDIDATE_OUTLINE_COLOR,
    );
}

fn debug_enabled(cli_args: Option<Res<CliArgs>>) -> bool {
    cli_args.is_some_and(|args| args.debug)
}

/// Plugin that draws snap guides while dragging
pub struct GuideRenderPlugin;

impl Plugin for GuideRenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_gizmo_config(
            SnapGuideGizmos,
            GizmoConfig {
                line: GizmoLineConfig {
                    width: GUIDE_STROKE_WIDTH,
                    ..default()
                },
                ..default()
            },
        )
        .add_systems(
            Update,
            (
                draw_snap_guides,
                draw_candidate_outlines.run_if(debug_enabled),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        segments: Vec<(Point, Point, GuideKind)>,
    }

    impl GuideSurface for RecordingSurface {
        fn stroke_segment(&mut self, from: Point, to: Point, kind: GuideKind) {
            self.segments.push((from, to, kind));
        }
    }

    #[test]
    fn test_nothing_to_draw() {
        let mut surface = RecordingSurface::default();
        render_guides(&[], 1.0, &mut surface);
        assert!(surface.segments.is_empty());
    }

    #[test]
    fn test_point_guides_are_normalized() {
        let line =
            GuideLine::point(Point::new(10.0, 80.0), Point::new(10.0, 20.0));
        let mut surface = RecordingSurface::default();
        render_guides(&[line], 1.0, &mut surface);

        assert_eq!(
            surface.segments,
            vec![(
                Point::new(10.0, 20.0),
                Point::new(10.0, 80.0),
                GuideKind::Point
            )]
        );
    }

    #[test]
    fn test_distribution_guides_get_end_caps() {
        let line = GuideLine::distribution(
            Point::new(150.0, 25.0),
            Point::new(50.0, 25.0),
        );
        let mut surface = RecordingSurface::default();
        render_guides(&[line], 2.0, &mut surface);

        assert_eq!(surface.segments.len(), 3, "segment plus two caps");
        assert_eq!(surface.segments[0].0, Point::new(50.0, 25.0));
        // Caps are 10 screen pixels each way, so 5 canvas units at zoom 2
        assert_eq!(
            surface.segments[1],
            (
                Point::new(50.0, 20.0),
                Point::new(50.0, 30.0),
                GuideKind::Distribution
            )
        );
        assert_eq!(surface.segments[2].0, Point::new(150.0, 20.0));
    }

    #[test]
    fn test_vertical_distribution_caps_are_horizontal() {
        let line = GuideLine::distribution(
            Point::new(40.0, 0.0),
            Point::new(40.0, 60.0),
        );
        let mut surface = RecordingSurface::default();
        render_guides(&[line], 1.0, &mut surface);

        let (from, to, _) = surface.segments[1];
        assert_eq!(from, Point::new(30.0, 0.0));
        assert_eq!(to, Point::new(50.0, 0.0));
    }
}
