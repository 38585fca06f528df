//! Axis-aligned bounding volumes
//!
//! Gameplay only cares about the lateral (x) and forward (z) axes; the
//! vertical extent is carried for presentation but ignored by overlap tests.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned box centered on an entity position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingVolume {
    pub center: Vec3,
    /// Full extents (w, h, d)
    pub size: Vec3,
}

impl BoundingVolume {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.size / 2.0
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.size / 2.0
    }

    /// Overlap in x and z; touching faces do not count
    pub fn intersects(&self, other: &BoundingVolume) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.z < b_max.z && a_max.z > b_min.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(x: f32, z: f32) -> BoundingVolume {
        BoundingVolume::new(Vec3::new(x, 0.0, z), Vec3::ONE)
    }

    #[test]
    fn test_overlap() {
        assert!(unit_at(0.0, 0.0).intersects(&unit_at(0.5, -0.5)));
        assert!(unit_at(0.5, -0.5).intersects(&unit_at(0.0, 0.0)));
    }

    #[test]
    fn test_separated_on_either_axis() {
        assert!(!unit_at(0.0, 0.0).intersects(&unit_at(2.0, 0.0)));
        assert!(!unit_at(0.0, 0.0).intersects(&unit_at(0.0, -2.0)));
    }

    #[test]
    fn test_touching_faces_miss() {
        assert!(!unit_at(0.0, 0.0).intersects(&unit_at(1.0, 0.0)));
    }

    #[test]
    fn test_vertical_axis_ignored() {
        let low = BoundingVolume::new(Vec3::new(0.0, -100.0, 0.0), Vec3::ONE);
        assert!(low.intersects(&unit_at(0.0, 0.0)));
    }
}
