//! Scene description loaded at startup
//!
//! A scene is a flat list of elements in canvas coordinates. It can come from
//! a JSON file, from a random scatter, or from the built-in default layout.
//!
//! ```json
//! { "elements": [ { "name": "card", "x": 0, "y": 0, "w": 120, "h": 80 },
//!                 { "name": "arrow", "x": 130, "y": 30, "w": 40, "h": 4,
//!                   "kind": "connector" } ] }
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::core::cli::CliArgs;
use crate::core::errors::{validate_bound, SnapContext, SnapResult};
use crate::core::settings::{DEFAULT_SCENE_COLUMNS, DEFAULT_SCENE_SPACING};
use crate::geometry::Bound;

/// What an element is, as far as snapping cares
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A regular shape that others can snap to
    #[default]
    Shape,
    /// A connector-like element; never used as a snapping anchor
    Connector,
}

impl ElementKind {
    pub fn is_alignable(self) -> bool {
        self != ElementKind::Connector
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneElement {
    #[serde(default)]
    pub name: SmolStr,
    #[serde(flatten)]
    pub bound: Bound,
    #[serde(default)]
    pub kind: ElementKind,
}

impl SceneElement {
    pub fn shape(name: &str, bound: Bound) -> Self {
        Self {
            name: SmolStr::new(name),
            bound,
            kind: ElementKind::Shape,
        }
    }

    pub fn connector(name: &str, bound: Bound) -> Self {
        Self {
            name: SmolStr::new(name),
            bound,
            kind: ElementKind::Connector,
        }
    }
}

/// Elements to spawn on startup
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasScene {
    pub elements: Vec<SceneElement>,
}

impl CanvasScene {
    /// Build the scene requested on the command line
    pub fn from_cli(args: &CliArgs) -> SnapResult<CanvasScene> {
        match (&args.scene_path, args.random) {
            (Some(path), _) => CanvasScene::load(path),
            (None, Some(count)) => Ok(CanvasScene::random(count, args.seed)),
            (None, None) => Ok(CanvasScene::default_layout()),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> SnapResult<CanvasScene> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).with_file_context("read", path)?;
        let scene = CanvasScene::from_json(&json)
            .with_context(|| format!("Failed to load scene {}", path.display()))?;
        info!(
            "Loaded {} elements from {}",
            scene.elements.len(),
            path.display()
        );
        Ok(scene)
    }

    pub fn from_json(json: &str) -> SnapResult<CanvasScene> {
        let scene: CanvasScene = serde_json::from_str(json)?;
        for (index, element) in scene.elements.iter().enumerate() {
            validate_bound(&element.bound).with_context(|| {
                format!("Invalid scene element #{index} '{}'", element.name)
            })?;
        }
        Ok(scene)
    }

    /// A few rows of evenly spaced cards of varying size, plus one connector
    pub fn default_layout() -> CanvasScene {
        let widths = [120.0, 80.0, 160.0, 100.0];
        let heights = [80.0, 120.0, 60.0];
        let mut elements = Vec::new();

        for (row, &h) in heights.iter().enumerate() {
            let y = row as f64 * (140.0 + DEFAULT_SCENE_SPACING) - 250.0;
            let mut x = -400.0;
            for (column, &w) in
                widths.iter().take(DEFAULT_SCENE_COLUMNS).enumerate()
            {
                let name = format!("card {}-{}", row + 1, column + 1);
                elements.push(SceneElement::shape(
                    &name,
                    Bound::new(x, y, w, h),
                ));
                x += w + DEFAULT_SCENE_SPACING;
            }
        }

        elements.push(SceneElement::connector(
            "connector",
            Bound::new(-280.0, 230.0, 300.0, 6.0),
        ));

        CanvasScene { elements }
    }

    /// `count` elements scattered around the origin, one in eight a connector
    pub fn random(count: usize, seed: u64) -> CanvasScene {
        let mut rng = StdRng::seed_from_u64(seed);
        let elements = (0..count)
            .map(|i| {
                let bound = Bound::new(
                    rng.gen_range(-600.0..600.0),
                    rng.gen_range(-400.0..400.0),
                    rng.gen_range(40.0..160.0),
                    rng.gen_range(40.0..160.0),
                );
                if rng.gen_ratio(1, 8) {
                    SceneElement::connector(&format!("connector {i}"), bound)
                } else {
                    SceneElement::shape(&format!("shape {i}"), bound)
                }
            })
            .collect();
        CanvasScene { elements }
    }
}
