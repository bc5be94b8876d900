//! Math utilities and types
//!
//! Provides the fundamental math types used by the scene graph and camera.
//! All matrices use nalgebra's column-vector convention, so `A * B` applies
//! `B` first, matching the OpenGL fixed-function matrix stack.

pub use nalgebra::{Matrix4, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }
}

/// Extension trait for Mat4 with the constructors the scene code needs
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis (angle in degrees)
    fn rotation_x_deg(degrees: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis (angle in degrees)
    fn rotation_y_deg(degrees: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis (angle in degrees)
    fn rotation_z_deg(degrees: f32) -> Mat4;

    /// Create a rotation around an arbitrary axis (angle in degrees)
    ///
    /// Returns the identity when the axis is degenerate, the same way a
    /// zero-length axis leaves the OpenGL matrix stack untouched.
    fn rotation_axis_deg(axis: Vec3, degrees: f32) -> Mat4;

    /// Compose translate, rotate and non-uniform scale in that fixed order
    fn translate_rotate_scale(translation: &Vec3, rotation: &Mat4, scale: &Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x_deg(degrees: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), utils::deg_to_rad(degrees))
    }

    fn rotation_y_deg(degrees: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(degrees))
    }

    fn rotation_z_deg(degrees: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(degrees))
    }

    fn rotation_axis_deg(axis: Vec3, degrees: f32) -> Mat4 {
        match Unit::try_new(axis, f32::EPSILON) {
            Some(unit) => Mat4::from_axis_angle(&unit, utils::deg_to_rad(degrees)),
            None => Mat4::identity(),
        }
    }

    fn translate_rotate_scale(translation: &Vec3, rotation: &Mat4, scale: &Vec3) -> Mat4 {
        Mat4::new_translation(translation) * rotation * Mat4::new_nonuniform_scaling(scale)
    }
}
