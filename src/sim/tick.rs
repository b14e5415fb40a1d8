//! Per-frame wave update
//!
//! One call advances ship motion, formation marching, hostile fire,
//! collisions, explosions, bolt travel, player fire and the boss, in that
//! order. Nothing suspends mid-update.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;

use super::state::{Bolt, Boss, Sprite, WaveOutcome};
use super::wave::Wave;
use crate::consts::*;
use crate::{heading, polar_to_cartesian};

/// Pre-sampled player intent for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

impl TickInput {
    /// +1 right, -1 left, 0 for neither or both
    pub fn direction(&self) -> f32 {
        (self.move_right as i8 - self.move_left as i8) as f32
    }
}

/// Advance the wave by one frame
pub fn tick(wave: &mut Wave, input: &TickInput, dt: f32) {
    if wave.outcome.is_over() {
        return;
    }
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

    if let Some(ship) = wave.ship.as_mut() {
        ship.steer(input.direction());
    }

    march(wave, dt);
    resolve_collisions(wave);

    if wave.grid.is_cleared() && wave.boss.is_none() {
        wave.boss = Some(Boss::new(Boss::SPAWN));
        log::info!("Formation cleared, boss incoming ({} health)", BOSS_LIVES);
    }

    wave.exploding.retain_mut(|alien| alien.advance_explosion());

    move_bolts_and_fire(wave, input.fire);
    update_boss(wave, dt);
}

/// Step the formation when the march timer is due
fn march(wave: &mut Wave, dt: f32) {
    wave.march_timer += dt;
    if wave.march_timer < wave.config.march_interval || wave.boss.is_some() {
        return;
    }

    if let Some((left_edge, right_edge)) = wave.grid.horizontal_extent() {
        let right_limit = GAME_WIDTH - ALIEN_H_SEP;
        if right_edge > right_limit {
            wave.direction = -1.0;
            wave.grid.shift(-(right_edge - right_limit), ALIEN_V_WALK);
        } else if left_edge < ALIEN_H_SEP {
            wave.direction = 1.0;
            wave.grid.shift(ALIEN_H_SEP - left_edge, ALIEN_V_WALK);
        } else {
            wave.grid.shift(ALIEN_H_WALK * wave.direction, 0.0);
        }
    }

    if let Some(lowest) = wave.grid.lowest() {
        if lowest.position().y - ALIEN_HEIGHT / 2.0 < DEFENSE_LINE {
            wave.outcome = WaveOutcome::Lost;
            log::info!("Defense line breached, wave lost");
        }
    }

    hostile_fire(wave);
    wave.march_timer = 0.0;
}

/// Count down march steps; on zero the lowest alien of a random column fires
fn hostile_fire(wave: &mut Wave) {
    wave.steps_until_fire = wave.steps_until_fire.saturating_sub(1);
    if wave.steps_until_fire > 0 {
        return;
    }

    let columns = wave.grid.occupied_columns();
    if !columns.is_empty() {
        let col = columns[wave.rng.random_range(0..columns.len())];
        if let Some(shooter) = wave.grid.lowest_in_column(col) {
            let pos = shooter.position() - Vec2::new(0.0, ALIEN_HEIGHT / 2.0 + BOLT_HEIGHT / 2.0);
            wave.bolts.push(Bolt::new(pos, Vec2::new(0.0, -BOLT_SPEED), 0.0));
        }
    }
    wave.steps_until_fire = wave.rng.random_range(1..=BOLT_RATE);
}

/// Bolts against the grid, then the ship, then the boss
fn resolve_collisions(wave: &mut Wave) {
    // A bolt is spent on its first kill
    let rows = wave.grid.rows();
    let columns = wave.grid.columns();
    let mut i = 0;
    while i < wave.bolts.len() {
        let bolt = &wave.bolts[i];
        let hit = (0..rows)
            .flat_map(|row| (0..columns).map(move |col| (row, col)))
            .find(|&(row, col)| {
                wave.grid
                    .get(row, col)
                    .is_some_and(|alien| alien.collides(bolt))
            });

        match hit.and_then(|(row, col)| wave.grid.take(row, col)) {
            Some(alien) => {
                wave.exploding.push(alien.exploding_copy());
                wave.bolts.remove(i);
            }
            None => i += 1,
        }
    }

    if let Some(ship) = wave.ship.as_ref() {
        if wave.bolts.iter().any(|bolt| ship.collides(bolt)) {
            wave.ship = None;
            wave.lives = wave.lives.saturating_sub(1);
            wave.bolts.clear();
            log::debug!("Ship destroyed, {} lives left", wave.lives);
            if wave.lives == 0 {
                wave.outcome = WaveOutcome::Lost;
                log::info!("Out of lives, wave lost");
            }
        }
    }

    if let Some(boss) = wave.boss.as_mut() {
        let outcome = &mut wave.outcome;
        wave.bolts.retain(|bolt| {
            if !boss.collides(bolt) {
                return true;
            }
            let health = boss.damage();
            log::debug!("Boss hit, {} health left", health);
            if health == 0 && *outcome == WaveOutcome::InProgress {
                *outcome = WaveOutcome::Won;
                log::info!("Boss defeated, wave won");
            }
            false
        });
    }
}

/// Move every bolt, drop the ones that left the screen, then let the ship fire
fn move_bolts_and_fire(wave: &mut Wave, fire: bool) {
    // Counted before travel: a shot leaving the screen this frame still blocks firing
    let player_bolt_live = wave.bolts.iter().any(Bolt::is_player_shot);

    for bolt in &mut wave.bolts {
        bolt.advance();
    }
    wave.bolts.retain(|bolt| !bolt.is_off_screen());

    if !fire || player_bolt_live {
        return;
    }
    if let Some(ship) = wave.ship.as_ref() {
        let angle = ship.rotation();
        wave.bolts
            .push(Bolt::new(ship.nose(), heading(angle) * BOLT_SPEED, angle));
    }
}

/// Sweep the boss along its path and fire volleys
fn update_boss(wave: &mut Wave, dt: f32) {
    let Some(boss) = wave.boss.as_mut() else {
        return;
    };

    wave.boss_time += dt / BOSS_SPEED_FACTOR;
    boss.body.set_x(GAME_WIDTH / 2.0 + P_X * (P_ALPHA * wave.boss_time).cos());
    boss.body
        .set_y((GAME_HEIGHT + DEFENSE_LINE) / 2.0 + P_Y * (P_BETA * wave.boss_time).sin());

    // Volleys share the march timer, which keeps running while the boss is out
    if wave.march_timer > BOSS_FIRE_RATE {
        let count = wave.rng.random_range(1..=BOSS_MAX_VOLLEY);
        let origin = boss.position() - Vec2::new(0.0, ALIEN_HEIGHT / 2.0);
        wave.bolts.extend(volley(origin, count));
        log::debug!("Boss volley of {}", count);
        wave.march_timer = 0.0;
    }
}

/// `count` bolts fanned evenly across the half-circle below `origin`
pub fn volley(origin: Vec2, count: u32) -> Vec<Bolt> {
    let n = count as f32;
    (0..count)
        .map(|k| {
            let k = k as f32;
            let fan = PI * (k + 1.0) / (n + 1.0);
            let rotation = 90.0 * (n - 1.0) / (n + 1.0) - 180.0 * k / (n + 1.0);
            Bolt::new(
                origin,
                polar_to_cartesian(BOLT_SPEED, -fan),
                rotation.to_radians(),
            )
        })
        .collect()
}
