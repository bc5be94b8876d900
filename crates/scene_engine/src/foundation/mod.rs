//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Colors
//! - Logging utilities

pub mod color;
pub mod logging;
pub mod math;
