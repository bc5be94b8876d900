//! # Scene Engine
//!
//! An editable scene graph with selection, grouping, rotation composition,
//! bounds and printing, plus the pieces needed to drive it interactively.
//!
//! ## Features
//!
//! - **Scene Graph**: generational node handles, one current node, one open group
//! - **Rendering Contract**: API-agnostic draw traversal with scoped transforms
//! - **Trackball Camera**: rotate, zoom, twist and pan from mouse drags
//! - **Editor Session**: textual commands dispatched onto graph and camera
//! - **Configuration**: TOML or RON files with validated defaults
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! let mut graph = SceneGraph::new();
//! graph.add_primitive(PrimitiveKind::Cone);
//! graph.add_primitive(PrimitiveKind::Sphere);
//! graph.select_next();
//! graph.add_selected_to_group();
//! graph.close_group();
//!
//! let mut out = Vec::new();
//! graph.print_scene_graph(&mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "Current Scene Graph\nRoot\n\tSphere\n\tGroup\n\t\tCone\n"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// Core engine modules
pub mod core;
pub mod config;
pub mod foundation;

pub mod editor;
pub mod input;
pub mod render;
pub mod scene;

pub use editor::{Editor, EditorOutcome};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{CameraConfig, EditorConfig, LoggingConfig, SceneConfig},
        config::{Config, ConfigError},
        editor::{Editor, EditorOutcome},
        foundation::{
            color::Color,
            math::{Mat4, Mat4Ext, Vec3},
        },
        input::{CommandError, EditorCommand},
        render::{
            Camera, CameraMode, DrawBatch, DrawCommand, DrawContext, DrawFlags, MouseButton,
            RecordingContext, SceneRenderer, TransformScope,
        },
        scene::{NodeId, NodeKind, PrimitiveKind, SceneGraph, AABB},
    };
}
