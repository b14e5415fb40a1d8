//! Bolt hit-tests
//!
//! A bolt is a thin rectangle. It hits a target when any of its four corners
//! lies inside the target's footprint. Angled bolts (boss volleys, banked
//! player shots) have their corners rotated by the travel angle.

use glam::Vec2;

use super::rect::RotatedRect;
use super::state::{Bolt, Sprite};

/// The four corners of a bolt in screen space
pub fn bolt_corners(bolt: &Bolt) -> [Vec2; 4] {
    bolt.bounds().corners()
}

/// Check whether any corner of `bolt` lies inside `target`.
///
/// Ownership is not considered here; callers filter by side first.
pub fn bolt_hits(target: &RotatedRect, bolt: &Bolt) -> bool {
    bolt_corners(bolt)
        .iter()
        .any(|corner| target.contains_point(*corner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_vertical_bolt_corners_axis_aligned() {
        let bolt = Bolt::new(Vec2::new(50.0, 50.0), Vec2::new(0.0, -BOLT_SPEED), 0.0);
        let corners = bolt_corners(&bolt);
        let min_x = corners.iter().map(|c| c.x).fold(f32::INFINITY, f32::min);
        let max_y = corners.iter().map(|c| c.y).fold(f32::NEG_INFINITY, f32::max);
        assert!((min_x - 48.0).abs() < 1e-4);
        assert!((max_y - 58.0).abs() < 1e-4);
    }

    #[test]
    fn test_sideways_bolt_keeps_upright_box() {
        // Travel angle zero: no turn, even though the bolt moves along +x
        let bolt = Bolt::new(Vec2::ZERO, Vec2::new(BOLT_SPEED, 0.0), 0.0);
        let corners = bolt_corners(&bolt);
        let max_x = corners.iter().map(|c| c.x).fold(f32::NEG_INFINITY, f32::max);
        let max_y = corners.iter().map(|c| c.y).fold(f32::NEG_INFINITY, f32::max);
        assert!((max_x - BOLT_WIDTH / 2.0).abs() < 1e-4);
        assert!((max_y - BOLT_HEIGHT / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotated_corner_reaches_target() {
        // 45 degree bolt: one long corner swings out to about (+7.1, -4.2)
        let target = RotatedRect::axis_aligned(Vec2::new(10.0, -7.0), Vec2::new(4.0, 4.0));
        let diagonal = Bolt::new(Vec2::new(3.0, -3.0), Vec2::new(3.0, 3.0), 0.0);
        assert!(bolt_hits(&target, &diagonal));
        let upright = Bolt::new(Vec2::new(3.0, -3.0), Vec2::new(0.0, 3.0), 0.0);
        assert!(!bolt_hits(&target, &upright));
    }

    #[test]
    fn test_miss_when_far() {
        let target = RotatedRect::axis_aligned(Vec2::new(100.0, 100.0), Vec2::new(33.0, 33.0));
        let bolt = Bolt::new(Vec2::new(300.0, 100.0), Vec2::new(0.0, BOLT_SPEED), 0.0);
        assert!(!bolt_hits(&target, &bolt));
    }
}
