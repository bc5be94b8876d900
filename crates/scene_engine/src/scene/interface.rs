//! Interface transform mirror
//!
//! The values UI controls edit for the current node. They are republished
//! from the node on every selection change and written back by
//! [`SceneGraph::apply_pending_transform`](crate::scene::SceneGraph::apply_pending_transform).

use crate::foundation::math::{utils, Vec3};
use crate::scene::node::Node;

/// UI-bound mirror of the current node's transform
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceTransform {
    scale: Vec3,
    translation: Vec3,
    rotation_delta: Vec3,
    scale_min: f32,
    scale_max: f32,
}

impl InterfaceTransform {
    /// Identity mirror with scale values clamped to `[scale_min, scale_max]`
    pub fn new(scale_min: f32, scale_max: f32) -> Self {
        Self {
            scale: Vec3::repeat(1.0),
            translation: Vec3::zeros(),
            rotation_delta: Vec3::zeros(),
            scale_min,
            scale_max,
        }
    }

    /// Absolute scale
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Absolute translation
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Pending rotation delta in degrees
    pub fn rotation_delta(&self) -> Vec3 {
        self.rotation_delta
    }

    /// Scale limits as `(min, max)`
    pub fn scale_limits(&self) -> (f32, f32) {
        (self.scale_min, self.scale_max)
    }

    /// Set the absolute scale, clamping each component to the limits
    ///
    /// Non-finite components keep their previous value.
    pub fn set_scale(&mut self, scale: Vec3) {
        let clamped = scale.map(|s| utils::clamp(s, self.scale_min, self.scale_max));
        self.scale = finite_or(clamped, self.scale);
    }

    /// Set the absolute translation; non-finite components keep their previous value
    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = finite_or(translation, self.translation);
    }

    /// Replace the pending rotation delta
    pub fn set_rotation_delta(&mut self, degrees: Vec3) {
        self.rotation_delta = finite_or(degrees, self.rotation_delta);
    }

    /// Accumulate into the pending rotation delta
    pub fn add_rotation_delta(&mut self, degrees: Vec3) {
        self.rotation_delta += finite_or(degrees, Vec3::zeros());
    }

    pub(crate) fn take_rotation_delta(&mut self) -> Vec3 {
        std::mem::replace(&mut self.rotation_delta, Vec3::zeros())
    }

    /// Copy a node's live values; the rotation delta starts at zero
    pub fn sync_from(&mut self, node: &Node) {
        self.scale = node.scale;
        self.translation = node.translation;
        self.rotation_delta = Vec3::zeros();
    }

    /// Back to the identity state
    pub fn reset(&mut self) {
        self.scale = Vec3::repeat(1.0);
        self.translation = Vec3::zeros();
        self.rotation_delta = Vec3::zeros();
    }
}

/// Per component: `value` where finite, else `fallback`
fn finite_or(value: Vec3, fallback: Vec3) -> Vec3 {
    value.zip_map(&fallback, |v, f| if v.is_finite() { v } else { f })
}

impl Default for InterfaceTransform {
    fn default() -> Self {
        Self::new(0.5, 4.0)
    }
}
