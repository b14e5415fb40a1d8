//! Wave simulation module
//!
//! All gameplay logic lives here:
//! - One `tick` per rendered frame, driven by a supplied dt
//! - Seedable RNG for hostile fire and boss volleys
//! - No rendering or input-device dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{bolt_corners, bolt_hits};
pub use rect::RotatedRect;
pub use state::{AnimatedBody, Alien, Bolt, Boss, Ship, Sprite, WaveOutcome};
pub use tick::{TickInput, tick, volley};
pub use wave::{AlienGrid, Drawables, Wave};
