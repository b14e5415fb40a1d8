//! Rotated rectangle geometry for hit-tests
//!
//! A rectangle is defined by:
//! - center: midpoint in screen space
//! - half_extents: half width (x) and half height (y) in the local frame
//! - rotation: counter-clockwise rotation about the center (radians)

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An oriented rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotatedRect {
    pub center: Vec2,
    pub half_extents: Vec2,
    /// Counter-clockwise rotation (radians)
    pub rotation: f32,
}

impl RotatedRect {
    pub fn new(center: Vec2, half_extents: Vec2, rotation: f32) -> Self {
        Self {
            center,
            half_extents,
            rotation,
        }
    }

    /// Axis-aligned rectangle from a center and full size
    pub fn axis_aligned(center: Vec2, size: Vec2) -> Self {
        Self::new(center, size / 2.0, 0.0)
    }

    /// Transform a screen-space point into the rectangle's local frame
    #[inline]
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        let offset = point - self.center;
        if self.rotation == 0.0 {
            return offset;
        }
        Vec2::from_angle(-self.rotation).rotate(offset)
    }

    /// Check if a point lies inside (or on the edge of) the rectangle
    pub fn contains_point(&self, point: Vec2) -> bool {
        let local = self.to_local(point);
        local.x.abs() <= self.half_extents.x && local.y.abs() <= self.half_extents.y
    }

    /// The four corners in screen space, counter-clockwise from bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        let rot = Vec2::from_angle(self.rotation);
        let Vec2 { x: hx, y: hy } = self.half_extents;
        [
            Vec2::new(-hx, -hy),
            Vec2::new(hx, -hy),
            Vec2::new(hx, hy),
            Vec2::new(-hx, hy),
        ]
        .map(|local| self.center + rot.rotate(local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_axis_aligned_contains() {
        let rect = RotatedRect::axis_aligned(Vec2::new(100.0, 50.0), Vec2::new(40.0, 20.0));
        assert!(rect.contains_point(Vec2::new(100.0, 50.0)));
        assert!(rect.contains_point(Vec2::new(119.0, 59.0)));
        assert!(!rect.contains_point(Vec2::new(121.0, 50.0)));
        assert!(!rect.contains_point(Vec2::new(100.0, 61.0)));
    }

    #[test]
    fn test_edge_is_inside() {
        let rect = RotatedRect::axis_aligned(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(rect.contains_point(Vec2::new(5.0, 5.0)));
        assert!(rect.contains_point(Vec2::new(-5.0, 0.0)));
    }

    #[test]
    fn test_quarter_turn_swaps_extents() {
        // Tall thin rectangle turned on its side
        let rect = RotatedRect::new(Vec2::ZERO, Vec2::new(2.0, 8.0), FRAC_PI_2);
        assert!(rect.contains_point(Vec2::new(7.0, 0.0)));
        assert!(!rect.contains_point(Vec2::new(0.0, 7.0)));
    }

    #[test]
    fn test_diagonal_rotation() {
        let rect = RotatedRect::new(Vec2::ZERO, Vec2::new(10.0, 1.0), FRAC_PI_4);
        // Along the rotated long axis
        assert!(rect.contains_point(Vec2::new(6.0, 6.0)));
        // Same distance, perpendicular to it
        assert!(!rect.contains_point(Vec2::new(6.0, -6.0)));
    }

    #[test]
    fn test_corners_unrotated() {
        let rect = RotatedRect::axis_aligned(Vec2::new(10.0, 10.0), Vec2::new(4.0, 16.0));
        let corners = rect.corners();
        assert_eq!(corners[0], Vec2::new(8.0, 2.0));
        assert_eq!(corners[2], Vec2::new(12.0, 18.0));
    }

    #[test]
    fn test_corners_are_contained() {
        let rect = RotatedRect::new(Vec2::new(3.0, -4.0), Vec2::new(5.0, 2.0), 0.7);
        for corner in rect.corners() {
            // Nudge toward the center to stay clear of rounding at the edge
            let nudged = corner + (rect.center - corner) * 0.001;
            assert!(rect.contains_point(nudged));
        }
    }
}
