//! Entity types for a wave
//!
//! Ship, Alien, Boss and Bolt are a closed set of variants sharing the
//! `Sprite` capability. Boss reuses the alien animation body rather than
//! being a kind of alien.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::bolt_hits;
use super::rect::RotatedRect;
use crate::consts::*;

/// Outcome of a wave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WaveOutcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl WaveOutcome {
    /// Won and Lost are terminal
    pub fn is_over(&self) -> bool {
        *self != WaveOutcome::InProgress
    }
}

/// A positioned, boundable, drawable entity
pub trait Sprite {
    /// Center of the sprite
    fn position(&self) -> Vec2;

    /// Full width and height
    fn size(&self) -> Vec2;

    /// Counter-clockwise rotation for drawing (radians)
    fn rotation(&self) -> f32 {
        0.0
    }

    /// Footprint used by hit-tests
    fn bounds(&self) -> RotatedRect {
        RotatedRect::axis_aligned(self.position(), self.size())
    }
}

/// A single laser bolt. Velocity and rotation never change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bolt {
    pub pos: Vec2,
    vel: Vec2,
    rotation: f32,
}

impl Bolt {
    pub fn new(pos: Vec2, vel: Vec2, rotation: f32) -> Self {
        Self { pos, vel, rotation }
    }

    /// Per-frame displacement
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    /// Fired by the ship and still able to hit aliens or the boss
    #[inline]
    pub fn is_player_shot(&self) -> bool {
        self.vel.y > 0.0
    }

    /// Fired by an alien or the boss and able to hit the ship
    #[inline]
    pub fn is_hostile_shot(&self) -> bool {
        self.vel.y < 0.0
    }

    /// Move by one frame of velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// True once the bolt has fully left the screen on any side
    pub fn is_off_screen(&self) -> bool {
        self.pos.y - BOLT_HEIGHT / 2.0 > GAME_HEIGHT
            || self.pos.y + BOLT_HEIGHT / 2.0 < 0.0
            || self.pos.x + BOLT_HALF_HEIGHT < 0.0
            || self.pos.x - BOLT_HALF_HEIGHT > GAME_WIDTH
    }
}

impl Sprite for Bolt {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        Vec2::new(BOLT_WIDTH, BOLT_HEIGHT)
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Angled shots turn the upright box by their travel angle, so a
    /// near-vertical banked shot lies almost flat
    fn bounds(&self) -> RotatedRect {
        let rotation = if self.vel.x != 0.0 {
            (self.vel.y / self.vel.x).atan()
        } else {
            0.0
        };
        RotatedRect::new(self.pos, self.size() / 2.0, rotation)
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pos: Vec2,
    velocity: f32,
    /// Bank angle (radians)
    rotation: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                (GAME_WIDTH / 2.0).floor(),
                SHIP_BOTTOM + SHIP_HALF_HEIGHT,
            ),
            velocity: 0.0,
            rotation: 0.0,
        }
    }
}

impl Ship {
    pub const LEFT_BOUND: f32 = SHIP_HALF_WIDTH;
    pub const RIGHT_BOUND: f32 = GAME_WIDTH - SHIP_HALF_WIDTH;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    /// Set x, clamped so the ship never leaves the screen
    pub fn set_x(&mut self, x: f32) {
        self.pos.x = x.clamp(Self::LEFT_BOUND, Self::RIGHT_BOUND);
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Set velocity, snapping tiny values to zero so the ship comes to rest
    pub fn set_velocity(&mut self, velocity: f32) {
        let threshold = SHIP_DECELERATION.min(SHIP_ACCELERATION);
        self.velocity = if velocity.abs() < threshold {
            0.0
        } else {
            velocity
        };
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    /// Apply one frame of the inertial movement model.
    ///
    /// `direction` is +1 for right, -1 for left, 0 for none or both.
    pub fn steer(&mut self, direction: f32) {
        let deceleration = if self.velocity > 0.0 {
            SHIP_DECELERATION
        } else if self.velocity < 0.0 {
            -SHIP_DECELERATION
        } else {
            0.0
        };
        self.set_velocity(self.velocity + direction * SHIP_ACCELERATION - deceleration);
        self.set_x(self.pos.x + self.velocity);

        if self.pos.x >= Self::RIGHT_BOUND || self.pos.x <= Self::LEFT_BOUND {
            self.set_velocity(0.0);
        }

        // Bank against the direction of travel
        self.set_rotation((self.velocity * -ANGLE_MULTIPLIER).to_radians());
    }

    /// Where a fired bolt leaves the rotated nose of the ship
    pub fn nose(&self) -> Vec2 {
        self.pos + crate::heading(self.rotation) * (SHIP_HALF_HEIGHT + BOLT_HALF_HEIGHT)
    }

    /// Hit by a hostile bolt anywhere inside the unrotated hull
    pub fn collides(&self, bolt: &Bolt) -> bool {
        bolt.is_hostile_shot() && bolt_hits(&self.bounds(), bolt)
    }
}

impl Sprite for Ship {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        Vec2::new(SHIP_WIDTH, SHIP_HEIGHT)
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }
}

/// Position and frame animation shared by aliens and the boss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatedBody {
    pos: Vec2,
    frame: u8,
    /// Number of frame requests so far
    counter: u32,
}

impl AnimatedBody {
    /// Highest y a body center may reach
    pub const CEILING_Y: f32 = GAME_HEIGHT - ALIEN_CEILING - ALIEN_HALF_HEIGHT;

    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            frame: 0,
            counter: 0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn set_x(&mut self, x: f32) {
        self.pos.x = x;
    }

    /// Set y, clamped to never rise above the ceiling
    pub fn set_y(&mut self, y: f32) {
        self.pos.y = y.min(Self::CEILING_Y);
    }

    pub fn frame(&self) -> u8 {
        self.frame
    }

    /// Request a frame. Walk frames apply at once; explosion frames only
    /// apply on every `EXPLOSION_SPEED`th request.
    pub fn set_frame(&mut self, frame: u8) {
        self.counter += 1;
        if frame < EXPLOSION_FIRST_FRAME || self.counter % EXPLOSION_SPEED == 0 {
            self.frame = frame;
        }
    }
}

/// A single alien in the formation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alien {
    pub body: AnimatedBody,
    /// Visual variant (0..ALIEN_VARIANTS)
    pub variant: usize,
}

impl Alien {
    pub fn new(pos: Vec2, variant: usize) -> Self {
        Self {
            body: AnimatedBody::new(pos),
            variant: variant % ALIEN_VARIANTS,
        }
    }

    /// A copy at the same spot, already showing the first explosion frame
    pub fn exploding_copy(&self) -> Self {
        let mut body = AnimatedBody::new(self.body.pos);
        body.frame = EXPLOSION_FIRST_FRAME;
        Self {
            body,
            variant: self.variant,
        }
    }

    pub fn frame(&self) -> u8 {
        self.body.frame()
    }

    /// Flip between the two walk frames
    pub fn toggle_walk_frame(&mut self) {
        let next = (self.body.frame() + 1) % 2;
        self.body.set_frame(next);
    }

    /// Move the explosion one step on. Returns false once the sequence is done.
    pub fn advance_explosion(&mut self) -> bool {
        let frame = self.body.frame();
        if frame >= EXPLOSION_LAST_FRAME {
            return false;
        }
        self.body.set_frame(frame + 1);
        true
    }

    /// Hit by a player bolt
    pub fn collides(&self, bolt: &Bolt) -> bool {
        bolt.is_player_shot() && bolt_hits(&self.bounds(), bolt)
    }
}

impl Sprite for Alien {
    fn position(&self) -> Vec2 {
        self.body.position()
    }

    fn size(&self) -> Vec2 {
        Vec2::new(ALIEN_WIDTH, ALIEN_HEIGHT)
    }
}

/// The end-of-wave boss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub body: AnimatedBody,
    health: u32,
}

impl Boss {
    /// Spawn point, above the top of the screen
    pub const SPAWN: Vec2 = Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT + DEFENSE_LINE / 2.0);

    pub fn new(pos: Vec2) -> Self {
        Self {
            body: AnimatedBody::new(pos),
            health: BOSS_LIVES,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    /// Take one hit. Returns the remaining health.
    pub fn damage(&mut self) -> u32 {
        self.health = self.health.saturating_sub(1);
        self.health
    }

    /// Hit by a player bolt
    pub fn collides(&self, bolt: &Bolt) -> bool {
        bolt.is_player_shot() && bolt_hits(&self.bounds(), bolt)
    }
}

impl Sprite for Boss {
    fn position(&self) -> Vec2 {
        self.body.position()
    }

    fn size(&self) -> Vec2 {
        Vec2::new(BOSS_WIDTH, BOSS_HEIGHT)
    }
}
