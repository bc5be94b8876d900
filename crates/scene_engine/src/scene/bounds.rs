//! Axis-aligned bounding boxes

use crate::foundation::math::{Mat4, Point3, Vec3};

/// Axis-Aligned Bounding Box for bounds queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Cube centered at the origin spanning `[-half, half]` on every axis
    pub fn cube(half: f32) -> Self {
        Self::from_center_extents(Vec3::zeros(), Vec3::repeat(half))
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Length of the diagonal from min to max
    pub fn diagonal(&self) -> f32 {
        (self.max - self.min).norm()
    }

    /// Component-wise union of two boxes
    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// The eight corners of the box
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Smallest axis-aligned box enclosing this box after `matrix` is applied
    ///
    /// All eight corners are mapped, so the result stays well formed
    /// (min <= max) under rotations and negative scales.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let mut corners = self
            .corners()
            .into_iter()
            .map(|c| matrix.transform_point(&Point3::from(c)).coords);

        // corners() is never empty
        let first = corners.next().unwrap_or_else(Vec3::zeros);
        corners.fold(AABB::new(first, first), |acc, p| AABB {
            min: acc.min.inf(&p),
            max: acc.max.sup(&p),
        })
    }
}
