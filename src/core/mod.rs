//! Core application functionality
//!
//! This module contains the core application logic, including:
//! - Application initialization and configuration
//! - Settings and CLI handling
//! - Error handling
//! - Pointer and coordinate management

pub mod app;
pub mod cli;
pub mod errors;
pub mod io;
pub mod settings;

// Re-export commonly used items
pub use app::create_app;
pub use cli::CliArgs;
pub use io::pointer::{PointerInfo, PointerPlugin};
pub use settings::SnapSettings;
