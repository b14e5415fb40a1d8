//! The wave aggregate root
//!
//! A `Wave` exclusively owns everything on screen for one playthrough: the
//! alien grid, the ship, the boss, all bolts and the exploding aliens. A new
//! wave must be constructed to play again.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::state::{Alien, Bolt, Boss, Ship, Sprite, WaveOutcome};
use crate::consts::*;
use crate::settings::WaveConfig;

/// Rectangular grid of aliens with holes where aliens were destroyed.
///
/// Row 0 is the bottom row.
#[derive(Debug, Clone)]
pub struct AlienGrid {
    rows: usize,
    columns: usize,
    cells: Vec<Option<Alien>>,
}

impl AlienGrid {
    /// Fully populated grid hanging from the ceiling
    pub fn new(rows: usize, columns: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for col in 0..columns {
                cells.push(Some(Alien::new(
                    Self::cell_center(rows, row, col),
                    (row / 2) % ALIEN_VARIANTS,
                )));
            }
        }
        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Starting center of a cell
    pub fn cell_center(rows: usize, row: usize, col: usize) -> Vec2 {
        let x = ALIEN_H_SEP * (col as f32 + 1.0) + ALIEN_WIDTH * (col as f32 + 0.5);
        let y = GAME_HEIGHT
            - ALIEN_CEILING
            - ALIEN_HALF_HEIGHT
            - (rows - row - 1) as f32 * (ALIEN_HEIGHT + ALIEN_V_SEP);
        Vec2::new(x, y)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The alien at (row, col), None if destroyed or out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&Alien> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.cells[row * self.columns + col].as_ref()
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Alien> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.cells[row * self.columns + col].as_mut()
    }

    /// Empty a cell, returning the alien that was there
    pub fn take(&mut self, row: usize, col: usize) -> Option<Alien> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.cells[row * self.columns + col].take()
    }

    /// Live aliens with their (row, col), bottom row first
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Alien)> {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|a| ((i / columns, i % columns), a)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Alien> {
        self.cells.iter_mut().flatten()
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// True once every alien has been destroyed
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Columns that still hold at least one alien, left to right
    pub fn occupied_columns(&self) -> Vec<usize> {
        (0..self.columns)
            .filter(|&col| (0..self.rows).any(|row| self.get(row, col).is_some()))
            .collect()
    }

    /// The lowest live alien in a column
    pub fn lowest_in_column(&self, col: usize) -> Option<&Alien> {
        (0..self.rows).find_map(|row| self.get(row, col))
    }

    /// Left and right edges of the live formation
    pub fn horizontal_extent(&self) -> Option<(f32, f32)> {
        self.iter().fold(None, |extent, (_, alien)| {
            let x = alien.position().x;
            let (left, right) = extent.unwrap_or((f32::INFINITY, f32::NEG_INFINITY));
            Some((left.min(x - ALIEN_HALF_WIDTH), right.max(x + ALIEN_HALF_WIDTH)))
        })
    }

    /// Lowest live alien anywhere in the grid
    pub fn lowest(&self) -> Option<&Alien> {
        self.iter()
            .map(|(_, alien)| alien)
            .min_by(|a, b| a.position().y.total_cmp(&b.position().y))
    }

    /// Shift every live alien and step its walk animation
    pub fn shift(&mut self, dx: f32, dy: f32) {
        for alien in self.iter_mut() {
            let pos = alien.position();
            alien.body.set_x(pos.x + dx);
            alien.body.set_y(pos.y - dy);
            alien.toggle_walk_frame();
        }
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }
}

/// Read-only view of everything a renderer needs
#[derive(Debug, Clone, Copy)]
pub struct Drawables<'a> {
    pub grid: &'a AlienGrid,
    pub exploding: &'a [Alien],
    pub ship: Option<&'a Ship>,
    pub boss: Option<&'a Boss>,
    pub bolts: &'a [Bolt],
    /// Endpoints of the defense line
    pub defense_line: (Vec2, Vec2),
}

impl<'a> Drawables<'a> {
    /// Every sprite, in draw order
    pub fn sprites(&self) -> Vec<&'a dyn Sprite> {
        let mut sprites: Vec<&'a dyn Sprite> = Vec::new();
        sprites.extend(self.grid.iter().map(|(_, a)| a as &dyn Sprite));
        sprites.extend(self.exploding.iter().map(|a| a as &dyn Sprite));
        if let Some(ship) = self.ship {
            sprites.push(ship);
        }
        sprites.extend(self.bolts.iter().map(|b| b as &dyn Sprite));
        if let Some(boss) = self.boss {
            sprites.push(boss);
        }
        sprites
    }
}

/// One playthrough of the alien formation and its boss
#[derive(Debug, Clone)]
pub struct Wave {
    pub(crate) config: WaveConfig,
    pub(crate) rng: Pcg32,
    pub(crate) grid: AlienGrid,
    pub(crate) exploding: Vec<Alien>,
    pub(crate) ship: Option<Ship>,
    pub(crate) boss: Option<Boss>,
    pub(crate) bolts: Vec<Bolt>,
    pub(crate) lives: u32,
    pub(crate) outcome: WaveOutcome,
    /// +1 marching right, -1 marching left
    pub(crate) direction: f32,
    /// March steps until the next hostile shot
    pub(crate) steps_until_fire: u32,
    /// Seconds since the last march step (also paces boss volleys)
    pub(crate) march_timer: f32,
    /// Parameter of the boss's path
    pub(crate) boss_time: f32,
}

impl Wave {
    /// New wave seeded from the process RNG
    pub fn new(config: &WaveConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// New wave with a reproducible RNG stream
    pub fn with_seed(config: &WaveConfig, seed: u64) -> Self {
        use rand::Rng;

        let config = config.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let steps_until_fire = rng.random_range(1..=BOLT_RATE);

        log::info!(
            "New wave: {}x{} aliens, {} lives",
            config.rows,
            config.columns,
            SHIP_LIVES
        );

        Self {
            grid: AlienGrid::new(config.rows, config.columns),
            config,
            rng,
            exploding: Vec::new(),
            ship: Some(Ship::new()),
            boss: None,
            bolts: Vec::new(),
            lives: SHIP_LIVES,
            outcome: WaveOutcome::InProgress,
            direction: 1.0,
            steps_until_fire,
            march_timer: 0.0,
            boss_time: 0.0,
        }
    }

    /// Advance one frame. `dt` is seconds since the previous frame.
    pub fn update(&mut self, move_left: bool, move_right: bool, fire: bool, dt: f32) {
        let input = super::tick::TickInput {
            move_left,
            move_right,
            fire,
        };
        super::tick::tick(self, &input, dt);
    }

    pub fn outcome(&self) -> WaveOutcome {
        self.outcome
    }

    pub fn ship_alive(&self) -> bool {
        self.ship.is_some()
    }

    pub fn lives_remaining(&self) -> u32 {
        self.lives
    }

    /// Restore a fresh ship after a lost life, keeping the lives count
    pub fn replace_ship(&mut self) {
        self.ship = Some(Ship::new());
    }

    pub fn grid(&self) -> &AlienGrid {
        &self.grid
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    /// Boss health, None until the boss appears
    pub fn boss_health(&self) -> Option<u32> {
        self.boss.as_ref().map(Boss::health)
    }

    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    /// Snapshot of all drawable entities
    pub fn drawables(&self) -> Drawables<'_> {
        Drawables {
            grid: &self.grid,
            exploding: &self.exploding,
            ship: self.ship.as_ref(),
            boss: self.boss.as_ref(),
            bolts: &self.bolts,
            defense_line: (
                Vec2::new(0.0, DEFENSE_LINE),
                Vec2::new(GAME_WIDTH, DEFENSE_LINE),
            ),
        }
    }
}
