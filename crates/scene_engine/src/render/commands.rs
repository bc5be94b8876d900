//! Recorded draw commands
//!
//! [`RecordingContext`] is a [`DrawContext`] that keeps its own matrix stack
//! and stores every emitted shape as a world-space [`DrawCommand`]. Hosts
//! replay the resulting [`DrawBatch`] into whatever API they render with;
//! tests use it to inspect what a frame would draw.

use crate::foundation::color::Color;
use crate::foundation::math::{Mat4, Point3, Vec3};
use crate::render::context::DrawContext;
use crate::scene::PrimitiveKind;

/// A single recorded draw
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A primitive shape with its full model transform
    Primitive {
        /// Which shape
        kind: PrimitiveKind,
        /// Model-to-world transform at the time of emission
        transform: Mat4,
        /// Color in effect
        color: Color,
    },
    /// A line segment already transformed to world space
    Line {
        /// World-space start point
        start: Vec3,
        /// World-space end point
        end: Vec3,
        /// Color in effect
        color: Color,
    },
}

/// Batch of draw commands in emission order
#[derive(Debug, Clone, Default)]
pub struct DrawBatch {
    /// List of commands to execute
    pub commands: Vec<DrawCommand>,
}

impl DrawBatch {
    /// Create a new empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command to this batch
    pub fn add(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Get the number of commands in this batch
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the batch is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Recorded primitives as `(kind, transform, color)`
    pub fn primitives(&self) -> impl Iterator<Item = (PrimitiveKind, &Mat4, Color)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Primitive { kind, transform, color } => Some((*kind, transform, *color)),
            DrawCommand::Line { .. } => None,
        })
    }

    /// Number of recorded line segments
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line { .. }))
            .count()
    }
}

/// Draw context that records world-space commands
#[derive(Debug, Clone)]
pub struct RecordingContext {
    stack: Vec<Mat4>,
    color: Color,
    batch: DrawBatch,
    underflows: usize,
}

impl RecordingContext {
    /// Start recording with an identity base transform
    pub fn new() -> Self {
        Self::with_base(Mat4::identity())
    }

    /// Start recording with `base` (for example a view matrix) as the outermost transform
    pub fn with_base(base: Mat4) -> Self {
        Self {
            stack: vec![base],
            color: Color::default(),
            batch: DrawBatch::new(),
            underflows: 0,
        }
    }

    /// The transform currently in effect
    pub fn current_transform(&self) -> Mat4 {
        self.top()
    }

    /// Number of pushes not yet matched by a pop
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// True when every push was matched by exactly one pop
    pub fn is_balanced(&self) -> bool {
        self.depth() == 0 && self.underflows == 0
    }

    /// Recorded commands so far
    pub fn batch(&self) -> &DrawBatch {
        &self.batch
    }

    /// Finish recording and take the commands
    pub fn into_batch(self) -> DrawBatch {
        self.batch
    }

    fn top(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or_else(Mat4::identity)
    }
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawContext for RecordingContext {
    fn push_transform(&mut self) {
        self.stack.push(self.top());
    }

    fn pop_transform(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            self.underflows += 1;
            log::warn!("Transform stack underflow");
        }
    }

    fn multiply_transform(&mut self, matrix: &Mat4) {
        if let Some(top) = self.stack.last_mut() {
            *top = *top * matrix;
        }
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn emit_primitive(&mut self, kind: PrimitiveKind) {
        let command = DrawCommand::Primitive {
            kind,
            transform: self.top(),
            color: self.color,
        };
        self.batch.add(command);
    }

    fn emit_line(&mut self, start: Vec3, end: Vec3) {
        let top = self.top();
        let command = DrawCommand::Line {
            start: top.transform_point(&Point3::from(start)).coords,
            end: top.transform_point(&Point3::from(end)).coords,
            color: self.color,
        };
        self.batch.add(command);
    }
}
