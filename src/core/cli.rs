//! Command line arguments for the application

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use crate::core::errors::validate_scene_path;

/// command line arguments for scene loading and snapping behavior
#[derive(Parser, Debug, Clone, Resource)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// path to a json scene file to load
    #[arg(long = "scene")]
    pub scene_path: Option<PathBuf>,

    /// scatter this many random elements instead of the default layout
    #[arg(long = "random", conflicts_with = "scene_path")]
    pub random: Option<usize>,

    /// seed for --random
    #[arg(long, default_value_t = 7)]
    pub seed: u64,

    /// snap distance in screen pixels
    #[arg(long, default_value_t = crate::core::settings::ALIGN_THRESHOLD)]
    pub threshold: f64,

    /// drag without snapping
    #[arg(long, default_value_t = false)]
    pub no_snap: bool,

    /// display debug information
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

impl CliArgs {
    /// Check arguments that clap cannot check by itself
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.scene_path {
            validate_scene_path(path).map_err(|e| e.to_string())?;
        }

        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(format!(
                "Snap threshold must be a positive number, got: {}",
                self.threshold
            ));
        }

        if self.random == Some(0) {
            return Err("--random needs at least one element".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let args = CliArgs::parse_from(["snapline"]);
        assert_eq!(args.threshold, 8.0);
        assert!(!args.no_snap);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let args = CliArgs::parse_from(["snapline", "--threshold", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_rejects_missing_scene() {
        let args =
            CliArgs::parse_from(["snapline", "--scene", "missing-scene.json"]);
        let err = args.validate().unwrap_err();
        assert!(err.contains("does not exist"), "got: {err}");
    }

    #[test]
    fn test_scene_and_random_conflict() {
        let result = CliArgs::try_parse_from([
            "snapline",
            "--scene",
            "a.json",
            "--random",
            "5",
        ]);
        assert!(result.is_err());
    }
}
