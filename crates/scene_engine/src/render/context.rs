//! Draw context seam
//!
//! The scene graph never talks to a graphics API directly. It drives a
//! [`DrawContext`], the minimal fixed-function style interface a rasterizer
//! binding has to provide.

use std::ops::{Deref, DerefMut};

use crate::foundation::color::Color;
use crate::foundation::math::{Mat4, Vec3};
use crate::scene::PrimitiveKind;

/// Immediate-mode drawing interface implemented by rasterizer bindings
pub trait DrawContext {
    /// Save the current transform
    fn push_transform(&mut self);

    /// Restore the most recently saved transform
    fn pop_transform(&mut self);

    /// Post-multiply the current transform by `matrix`
    fn multiply_transform(&mut self, matrix: &Mat4);

    /// Set the color of subsequent geometry
    fn set_color(&mut self, color: Color);

    /// Emit a primitive shape under the current transform
    fn emit_primitive(&mut self, kind: PrimitiveKind);

    /// Emit a line segment under the current transform
    fn emit_line(&mut self, start: Vec3, end: Vec3);
}

/// Pushes a transform on creation and pops it when dropped
///
/// Dereferences to the wrapped context, so drawing happens through the
/// scope and the pop cannot be forgotten on any exit path.
pub struct TransformScope<'a, C: DrawContext + ?Sized> {
    ctx: &'a mut C,
}

impl<'a, C: DrawContext + ?Sized> TransformScope<'a, C> {
    /// Open a new transform scope on `ctx`
    pub fn new(ctx: &'a mut C) -> Self {
        ctx.push_transform();
        Self { ctx }
    }
}

impl<C: DrawContext + ?Sized> Deref for TransformScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.ctx
    }
}

impl<C: DrawContext + ?Sized> DerefMut for TransformScope<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.ctx
    }
}

impl<C: DrawContext + ?Sized> Drop for TransformScope<'_, C> {
    fn drop(&mut self) {
        self.ctx.pop_transform();
    }
}
