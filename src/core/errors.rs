//!    Error handling
//!
//! This module provides error handling using anyhow.
//! The snapping engine itself never fails; only the application around it
//! (scene files, command line input) can.

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, ensure, Error};
use anyhow::{Context, Result};

use crate::geometry::Bound;

/// Result type alias for convenience throughout the application
pub type SnapResult<T> = Result<T>;

/// Helper functions for creating common error contexts
pub trait SnapContext<T> {
    /// Add file operation context to an error
    fn with_file_context<P: AsRef<std::path::Path>>(
        self,
        operation: &str,
        path: P,
    ) -> SnapResult<T>;
}

impl<T, E> SnapContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_file_context<P: AsRef<std::path::Path>>(
        self,
        operation: &str,
        path: P,
    ) -> SnapResult<T> {
        self.with_context(|| {
            format!("Failed to {} file: {}", operation, path.as_ref().display())
        })
    }
}

/// Validation helpers that return anyhow errors
pub fn validate_bound(bound: &Bound) -> SnapResult<()> {
    ensure!(
        bound.x.is_finite() && bound.y.is_finite(),
        "Position must be finite, got: ({}, {})",
        bound.x,
        bound.y
    );
    ensure!(
        bound.w.is_finite() && bound.h.is_finite(),
        "Size must be finite, got: {}x{}",
        bound.w,
        bound.h
    );
    ensure!(
        bound.w >= 0.0 && bound.h >= 0.0,
        "Size must not be negative, got: {}x{}",
        bound.w,
        bound.h
    );
    Ok(())
}

pub fn validate_scene_path<P: AsRef<std::path::Path>>(path: P) -> SnapResult<()> {
    let path = path.as_ref();

    ensure!(path.exists(), "Scene path does not exist: {}", path.display());
    ensure!(
        path.is_file(),
        "Scene path must be a file: {}",
        path.display()
    );

    Ok(())
}
