//! # Core Engine Module
//!
//! Shared abstractions used by every other subsystem.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for logging, scene defaults and camera

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{CameraConfig, EditorConfig, LoggingConfig, SceneConfig};
pub use crate::config::{Config, ConfigError};
