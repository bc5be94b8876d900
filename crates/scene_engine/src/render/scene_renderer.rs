//! Scene Renderer - walks the scene graph into a draw context
//!
//! Draws the rooted tree first and the open group (if any) after it. Every
//! node is drawn inside its own [`TransformScope`] so sibling transforms
//! never leak into each other.

use bitflags::bitflags;

use crate::core::config::SceneConfig;
use crate::foundation::color::Color;
use crate::foundation::math::{Mat4, Vec3};
use crate::render::context::{DrawContext, TransformScope};
use crate::scene::{NodeId, NodeKind, SceneGraph};

bitflags! {
    /// Optional parts of a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DrawFlags: u32 {
        /// Local axes of every node
        const AXES = 1 << 0;
        /// Selected nodes in the highlight color
        const HIGHLIGHT_SELECTION = 1 << 1;
        /// The detached group under construction
        const OPEN_GROUP = 1 << 2;
    }
}

impl Default for DrawFlags {
    fn default() -> Self {
        DrawFlags::all()
    }
}

/// Draws a [`SceneGraph`] through any [`DrawContext`]
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    flags: DrawFlags,
    highlight_color: Color,
}

impl SceneRenderer {
    /// Create a renderer with explicit flags and highlight color
    pub fn new(flags: DrawFlags, highlight_color: Color) -> Self {
        Self { flags, highlight_color }
    }

    /// Create a renderer from the scene configuration
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.draw_flags(), config.highlight_color)
    }

    /// Active draw flags
    pub fn flags(&self) -> DrawFlags {
        self.flags
    }

    /// Replace the draw flags
    pub fn set_flags(&mut self, flags: DrawFlags) {
        self.flags = flags;
    }

    /// Draw the whole scene
    pub fn draw<C: DrawContext + ?Sized>(&self, graph: &SceneGraph, ctx: &mut C) {
        self.draw_node(graph, graph.root(), ctx);

        if self.flags.contains(DrawFlags::OPEN_GROUP) {
            if let Some(group) = graph.open_group() {
                self.draw_node(graph, group, ctx);
            }
        }
    }

    fn draw_node<C: DrawContext + ?Sized>(&self, graph: &SceneGraph, id: NodeId, ctx: &mut C) {
        let Some(node) = graph.node(id) else {
            log::warn!("Skipping missing node {id:?}");
            return;
        };
        log::trace!("Drawing {} {id:?}", node.kind().name());

        let mut scope = TransformScope::new(ctx);
        scope.multiply_transform(&node.local_transform());

        if self.flags.contains(DrawFlags::AXES) {
            draw_axes(&mut *scope, node.axis_scale);
        }

        let color = if node.is_selected() && self.flags.contains(DrawFlags::HIGHLIGHT_SELECTION) {
            self.highlight_color
        } else {
            node.color
        };
        scope.set_color(color);

        match node.kind() {
            NodeKind::Primitive(kind) => scope.emit_primitive(*kind),
            NodeKind::Group { children } => {
                for child in children {
                    self.draw_node(graph, *child, &mut *scope);
                }
            }
        }
    }
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

/// Unit axes: blue Z, red X, green Y
fn draw_axes<C: DrawContext + ?Sized>(ctx: &mut C, axis_scale: f32) {
    let mut scope = TransformScope::new(ctx);
    scope.multiply_transform(&Mat4::new_scaling(axis_scale));

    for (axis, color) in [
        (Vec3::z(), Color::BLUE),
        (Vec3::x(), Color::RED),
        (Vec3::y(), Color::GREEN),
    ] {
        scope.set_color(color);
        scope.emit_line(Vec3::zeros(), axis);
    }
}
