//! Procedural primitive geometry
//!
//! The spindle is a surface of revolution of a Gaussian profile around the
//! x axis. Rasterizer bindings without a native spindle can tessellate it
//! with [`spindle_strips`].

use crate::foundation::math::constants::PI;
use crate::foundation::math::Vec3;

/// Half-length of the spindle along x before scaling
pub const SPINDLE_HALF_LENGTH: f32 = 0.45;

/// Uniform scale applied to the whole spindle
pub const SPINDLE_SCALE: f32 = 0.65;

/// Radius of the spindle at `x`
pub fn spindle_profile(x: f32) -> f32 {
    0.5 * (-20.0 * x * x).exp()
}

/// Quad strips covering the spindle surface
///
/// Returns one strip per x interval. Each strip alternates vertices on the
/// two rings bounding the interval and closes around the axis, so it holds
/// `2 * (intervals_theta + 1)` vertices. Zero intervals yield no strips.
pub fn spindle_strips(intervals_x: usize, intervals_theta: usize) -> Vec<Vec<Vec3>> {
    if intervals_x == 0 || intervals_theta == 0 {
        return Vec::new();
    }

    let step_x = 2.0 * SPINDLE_HALF_LENGTH / intervals_x as f32;
    let step_theta = 2.0 * PI / intervals_theta as f32;

    (0..intervals_x)
        .map(|i| {
            let x0 = -SPINDLE_HALF_LENGTH + i as f32 * step_x;
            let x1 = x0 + step_x;
            let (r0, r1) = (spindle_profile(x0), spindle_profile(x1));

            let mut strip = Vec::with_capacity(2 * (intervals_theta + 1));
            for j in 0..=intervals_theta {
                let (sin, cos) = (j as f32 * step_theta).sin_cos();
                strip.push(ring_point(x0, r0, cos, sin));
                strip.push(ring_point(x1, r1, cos, sin));
            }
            strip
        })
        .collect()
}

fn ring_point(x: f32, radius: f32, cos: f32, sin: f32) -> Vec3 {
    Vec3::new(x, radius * cos, radius * sin) * SPINDLE_SCALE
}
