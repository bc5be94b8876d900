//! Input handling
//!
//! Textual commands driving the editor session.

pub mod commands;

pub use commands::{CommandError, EditorCommand};
