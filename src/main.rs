//! Alien Invaders entry point
//!
//! Builds the wave configuration from the command line and runs the game
//! headless at a fixed timestep with a simple autopilot at the controls.

use clap::Parser;

use alien_invaders::sim::Wave;
use alien_invaders::{App, AppInput, AppState, WaveConfig};

/// Seconds per simulated frame
const FRAME_DT: f32 = 1.0 / 60.0;
/// Autopilot stops steering when this close to its target
const AIM_TOLERANCE: f32 = 4.0;

#[derive(Parser)]
#[command(name = "alien-invaders")]
#[command(about = "Play one wave of Alien Invaders on autopilot")]
struct Args {
    /// Number of alien rows (1-10)
    rows: Option<String>,

    /// Number of aliens per row (1-15)
    columns: Option<String>,

    /// Seconds between formation march steps (0-3]
    speed: Option<String>,

    /// Stop after this many frames
    #[arg(long, default_value_t = 60 * 60 * 10)]
    frames: u32,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    /// Positional overrides in order, stopping at the first missing one
    fn overrides(&self) -> Vec<&str> {
        [&self.rows, &self.columns, &self.speed]
            .into_iter()
            .map_while(|arg| arg.as_deref())
            .collect()
    }
}

/// Horizontal position the autopilot wants the ship under
fn target_x(wave: &Wave) -> Option<f32> {
    if let Some(boss) = wave.boss() {
        return Some(boss.body.position().x);
    }
    let ship_x = wave.ship()?.x();
    let grid = wave.grid();
    grid.occupied_columns()
        .into_iter()
        .filter_map(|col| grid.lowest_in_column(col))
        .map(|alien| alien.body.position().x)
        .min_by(|a, b| (a - ship_x).abs().total_cmp(&(b - ship_x).abs()))
}

/// Input for one frame. Menu keys alternate so every press is a fresh edge.
fn autopilot(app: &App, frame: u32) -> AppInput {
    let tap = frame % 2 == 0;
    match app.state() {
        AppState::Inactive => AppInput {
            start: tap,
            ..Default::default()
        },
        AppState::Paused => AppInput {
            resume: tap,
            ..Default::default()
        },
        AppState::Active => {
            let Some(wave) = app.wave() else {
                return AppInput::default();
            };
            let (left, right) = match (wave.ship(), target_x(wave)) {
                (Some(ship), Some(target)) if target < ship.x() - AIM_TOLERANCE => (true, false),
                (Some(ship), Some(target)) if target > ship.x() + AIM_TOLERANCE => (false, true),
                _ => (false, false),
            };
            AppInput {
                left,
                right,
                fire: true,
                ..Default::default()
            }
        }
        AppState::NewWave | AppState::Continue | AppState::Complete => AppInput::default(),
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let config = WaveConfig::from_args(&args.overrides());

    match serde_json::to_string(&config) {
        Ok(json) => log::info!("Alien Invaders starting with config {}", json),
        Err(e) => log::warn!("Could not serialize config: {}", e),
    }

    let mut app = match args.seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            App::with_seed(config, seed)
        }
        None => App::new(config),
    };

    for frame in 0..args.frames {
        let input = autopilot(&app, frame);
        app.update(&input, FRAME_DT);

        if app.state() == AppState::Complete {
            let message = app.message().unwrap_or_default();
            log::info!("Finished after {} frames: {}", frame + 1, message);
            println!("{}", message);
            return;
        }
    }

    log::warn!("Stopped after {} frames without a result", args.frames);
    if let Some(wave) = app.wave() {
        println!(
            "Wave still in progress: {} aliens left, {} lives",
            wave.grid().live_count(),
            wave.lives_remaining()
        );
    }
}
