//! Utilities and Helper Functions
//!
//! This module contains utility functions and helper modules:
//! - Logging configuration and setup
//! - Snapping scenario tests

pub mod logger;
