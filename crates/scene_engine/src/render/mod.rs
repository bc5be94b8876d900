//! # Rendering System
//!
//! API-agnostic drawing layer for the scene graph.
//!
//! ## Architecture
//!
//! - **DrawContext**: the seam a rasterizer binding implements
//! - **SceneRenderer**: walks the graph into a context, one scoped transform per node
//! - **RecordingContext**: a context that captures world-space commands for hosts and tests
//! - **Camera**: trackball viewing transform and projection
//! - **Geometry**: procedural shapes the fixed primitive set lacks

pub mod camera;
pub mod commands;
pub mod context;
pub mod geometry;
pub mod scene_renderer;

pub use camera::{Camera, CameraMode, MouseButton};
pub use commands::{DrawBatch, DrawCommand, RecordingContext};
pub use context::{DrawContext, TransformScope};
pub use geometry::{spindle_profile, spindle_strips};
pub use scene_renderer::{DrawFlags, SceneRenderer};
