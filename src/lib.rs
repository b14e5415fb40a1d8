//! Alien Invaders - a wave-based arcade shooter core
//!
//! Core modules:
//! - `sim`: Wave simulation (ship, formation, bolts, collisions, boss)
//! - `settings`: Startup configuration with validated overrides
//! - `app`: Application shell state machine driving a wave
//!
//! Coordinates are in pixels with the origin at the bottom-left of the
//! screen and y growing upward. Rotations are counter-clockwise.

pub mod app;
pub mod settings;
pub mod sim;

pub use app::{App, AppInput, AppState};
pub use settings::WaveConfig;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 700.0;

    /// Ship defaults
    pub const SHIP_WIDTH: f32 = 44.0;
    pub const SHIP_HEIGHT: f32 = 44.0;
    /// Half extents rounded down to whole pixels
    pub const SHIP_HALF_WIDTH: f32 = 22.0;
    pub const SHIP_HALF_HEIGHT: f32 = 22.0;
    /// Distance of the bottom of the ship from the bottom of the screen
    pub const SHIP_BOTTOM: f32 = 32.0;
    pub const SHIP_LIVES: u32 = 3;
    /// Velocity gained per frame while a direction is held
    pub const SHIP_ACCELERATION: f32 = 0.15;
    /// Velocity lost per frame toward zero (inertial slow-down)
    pub const SHIP_DECELERATION: f32 = 0.075;
    /// Bank angle in degrees per unit of horizontal velocity
    pub const ANGLE_MULTIPLIER: f32 = 6.0;

    /// The y-coordinate of the defense line the ship is protecting
    pub const DEFENSE_LINE: f32 = 100.0;

    /// Alien defaults
    pub const ALIEN_WIDTH: f32 = 33.0;
    pub const ALIEN_HEIGHT: f32 = 33.0;
    pub const ALIEN_HALF_WIDTH: f32 = 16.0;
    pub const ALIEN_HALF_HEIGHT: f32 = 16.0;
    pub const ALIEN_H_SEP: f32 = 16.0;
    pub const ALIEN_V_SEP: f32 = 16.0;
    /// Horizontal distance of one march step (ALIEN_WIDTH / 4, rounded down)
    pub const ALIEN_H_WALK: f32 = 8.0;
    /// Vertical drop when the formation hits a side
    pub const ALIEN_V_WALK: f32 = 16.0;
    /// Distance of the top alien row from the top of the screen
    pub const ALIEN_CEILING: f32 = 100.0;
    /// Number of visual variants, two grid rows per variant from the bottom up
    pub const ALIEN_VARIANTS: usize = 3;
    /// Walk cycle frames are 0..=1, explosion frames are 2..=5
    pub const EXPLOSION_FIRST_FRAME: u8 = 2;
    pub const EXPLOSION_LAST_FRAME: u8 = 5;
    /// Explosion frames only advance on every Nth frame request
    pub const EXPLOSION_SPEED: u32 = 3;

    /// Formation defaults (overridable at startup)
    pub const ALIEN_ROWS: usize = 5;
    pub const ALIENS_IN_ROW: usize = 12;
    /// Seconds between march steps
    pub const ALIEN_SPEED: f32 = 1.0;

    /// Bolt defaults
    pub const BOLT_WIDTH: f32 = 4.0;
    pub const BOLT_HEIGHT: f32 = 16.0;
    pub const BOLT_HALF_HEIGHT: f32 = 8.0;
    /// Pixels travelled per frame along the bolt's heading
    pub const BOLT_SPEED: f32 = 6.0;
    /// Upper bound of march steps between hostile shots
    pub const BOLT_RATE: u32 = 5;

    /// Boss defaults
    pub const BOSS_WIDTH: f32 = 75.0;
    pub const BOSS_HEIGHT: f32 = 75.0;
    pub const BOSS_LIVES: u32 = 3;
    /// Frequencies of the boss's parametric path
    pub const P_ALPHA: f32 = 7.0;
    pub const P_BETA: f32 = 6.0;
    /// Amplitudes of the boss's parametric path
    pub const P_X: f32 = 250.0;
    pub const P_Y: f32 = 150.0;
    /// Higher is slower
    pub const BOSS_SPEED_FACTOR: f32 = 4.0;
    /// Seconds between boss volleys
    pub const BOSS_FIRE_RATE: f32 = 2.0;
    pub const BOSS_MAX_VOLLEY: u32 = 8;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Unit vector pointing "up" after a counter-clockwise rotation by `angle`
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(-angle.sin(), angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_heading_zero_points_up() {
        let h = heading(0.0);
        assert!(h.x.abs() < 1e-6);
        assert!((h.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, 0.0);
        assert_eq!(p, Vec2::new(2.0, 0.0));
        let q = polar_to_cartesian(6.0, -FRAC_PI_2);
        assert!(q.x.abs() < 1e-5);
        assert!((q.y + 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_heading_quarter_turn_points_left() {
        let h = heading(FRAC_PI_2);
        assert!((h.x + 1.0).abs() < 1e-6);
        assert!(h.y.abs() < 1e-6);
    }
}
