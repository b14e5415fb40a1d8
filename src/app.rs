//! Application shell
//!
//! Decides when to build a new wave, when to pause after a lost life and when
//! the game is over. Input arrives pre-sampled each frame; the shell never
//! touches entities directly, only the `Wave` API.

use serde::{Deserialize, Serialize};

use crate::settings::WaveConfig;
use crate::sim::{Wave, WaveOutcome};

/// Lifecycle of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppState {
    /// Waiting for the player to start
    #[default]
    Inactive,
    /// Building a fresh wave (lasts one frame)
    NewWave,
    /// Wave in play
    Active,
    /// Ship lost with lives remaining, wave still visible
    Paused,
    /// Restoring the ship (lasts one frame)
    Continue,
    /// Wave won or lost
    Complete,
}

/// Everything a transition may depend on, sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    /// Start key went down this frame
    pub start_pressed: bool,
    /// Continue key went down this frame
    pub continue_pressed: bool,
    /// Outcome of the current wave, None when there is no wave
    pub outcome: Option<WaveOutcome>,
    /// Ship destroyed but lives remain
    pub ship_down: bool,
}

impl AppState {
    /// The transition table. At most one step per frame.
    pub fn next(self, signals: &Signals) -> AppState {
        use AppState::*;

        match self {
            Inactive if signals.start_pressed => NewWave,
            NewWave => Active,
            Active => match signals.outcome {
                None => Inactive,
                Some(WaveOutcome::Lost) | Some(WaveOutcome::Won) => Complete,
                Some(WaveOutcome::InProgress) if signals.ship_down => Paused,
                Some(WaveOutcome::InProgress) => Active,
            },
            Paused if signals.continue_pressed => Continue,
            Continue => Active,
            Complete if signals.start_pressed => Inactive,
            state => state,
        }
    }
}

/// Detects the frame on which a key goes down
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyLatch {
    was_down: bool,
}

impl KeyLatch {
    /// Feed this frame's key state. True only on an up-to-down edge.
    pub fn pressed(&mut self, down: bool) -> bool {
        let edge = down && !self.was_down;
        self.was_down = down;
        edge
    }
}

/// Pre-sampled input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Start a game / return to the title
    pub start: bool,
    /// Continue after losing a life
    pub resume: bool,
}

/// Top-level controller owning the current wave
#[derive(Debug)]
pub struct App {
    config: WaveConfig,
    seed: Option<u64>,
    state: AppState,
    wave: Option<Wave>,
    start_key: KeyLatch,
    continue_key: KeyLatch,
    waves_played: u64,
}

impl App {
    pub fn new(config: WaveConfig) -> Self {
        Self {
            config,
            seed: None,
            state: AppState::Inactive,
            wave: None,
            start_key: KeyLatch::default(),
            continue_key: KeyLatch::default(),
            waves_played: 0,
        }
    }

    /// Every wave gets a seed derived from `seed`, for reproducible runs
    pub fn with_seed(config: WaveConfig, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new(config)
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn wave(&self) -> Option<&Wave> {
        self.wave.as_ref()
    }

    pub fn waves_played(&self) -> u64 {
        self.waves_played
    }

    /// Text to overlay for the current state
    pub fn message(&self) -> Option<&'static str> {
        match self.state {
            AppState::Inactive => Some("Press 's' to start"),
            AppState::Paused => Some("Press c to continue"),
            AppState::Complete => match self.wave.as_ref().map(Wave::outcome) {
                Some(WaveOutcome::Won) => Some("you win :)"),
                _ => Some("Game Over :("),
            },
            AppState::NewWave | AppState::Active | AppState::Continue => None,
        }
    }

    /// Advance one frame
    pub fn update(&mut self, input: &AppInput, dt: f32) {
        let start_pressed = self.start_key.pressed(input.start);
        let continue_pressed = self.continue_key.pressed(input.resume);

        match self.state {
            AppState::NewWave => {
                self.wave = Some(self.spawn_wave());
            }
            AppState::Active => {
                if let Some(wave) = self.wave.as_mut() {
                    wave.update(input.left, input.right, input.fire, dt);
                }
            }
            AppState::Continue => {
                if let Some(wave) = self.wave.as_mut() {
                    wave.replace_ship();
                }
            }
            AppState::Inactive | AppState::Paused | AppState::Complete => {}
        }

        let signals = Signals {
            start_pressed,
            continue_pressed,
            outcome: self.wave.as_ref().map(Wave::outcome),
            ship_down: self
                .wave
                .as_ref()
                .is_some_and(|w| !w.ship_alive() && w.lives_remaining() > 0),
        };

        let next = self.state.next(&signals);
        if next != self.state {
            log::info!("App state {:?} -> {:?}", self.state, next);
            if next == AppState::Inactive {
                self.wave = None;
            }
            if next == AppState::Complete {
                if let Some(outcome) = signals.outcome {
                    log::info!("Wave {} finished: {:?}", self.waves_played, outcome);
                }
            }
            self.state = next;
        }
    }

    fn spawn_wave(&mut self) -> Wave {
        self.waves_played += 1;
        match self.seed {
            Some(seed) => Wave::with_seed(&self.config, seed.wrapping_add(self.waves_played)),
            None => Wave::new(&self.config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn press_start() -> AppInput {
        AppInput {
            start: true,
            ..Default::default()
        }
    }

    fn press_resume() -> AppInput {
        AppInput {
            resume: true,
            ..Default::default()
        }
    }

    fn started_app() -> App {
        let mut app = App::with_seed(WaveConfig::default(), 5);
        app.update(&press_start(), FRAME);
        assert_eq!(app.state(), AppState::NewWave);
        app.update(&AppInput::default(), FRAME);
        assert_eq!(app.state(), AppState::Active);
        app
    }

    #[test]
    fn test_key_latch_edges() {
        let mut latch = KeyLatch::default();
        assert!(latch.pressed(true));
        // Held: no retrigger
        assert!(!latch.pressed(true));
        assert!(!latch.pressed(false));
        assert!(latch.pressed(true));
    }

    #[test]
    fn test_inactive_waits_for_start() {
        let mut app = App::new(WaveConfig::default());
        for _ in 0..10 {
            app.update(&AppInput::default(), FRAME);
        }
        assert_eq!(app.state(), AppState::Inactive);
        assert!(app.wave().is_none());
        assert_eq!(app.message(), Some("Press 's' to start"));
    }

    #[test]
    fn test_start_builds_wave() {
        let app = started_app();
        assert!(app.wave().is_some());
        assert_eq!(app.waves_played(), 1);
        assert_eq!(app.message(), None);
    }

    #[test]
    fn test_holding_start_does_not_restart() {
        let mut app = App::with_seed(WaveConfig::default(), 1);
        for _ in 0..5 {
            app.update(&press_start(), FRAME);
        }
        assert_eq!(app.state(), AppState::Active);
        assert_eq!(app.waves_played(), 1);
    }

    #[test]
    fn test_pause_and_continue_after_lost_life() {
        let mut app = started_app();
        let wave = app.wave.as_mut().unwrap();
        wave.ship = None;
        wave.lives = 2;

        app.update(&AppInput::default(), FRAME);
        assert_eq!(app.state(), AppState::Paused);
        assert_eq!(app.message(), Some("Press c to continue"));

        // Paused: the wave is frozen
        let timer = app.wave().unwrap().march_timer;
        app.update(&AppInput::default(), 5.0);
        assert_eq!(app.wave().unwrap().march_timer, timer);

        app.update(&press_resume(), FRAME);
        assert_eq!(app.state(), AppState::Continue);
        app.update(&AppInput::default(), FRAME);
        assert_eq!(app.state(), AppState::Active);
        assert!(app.wave().unwrap().ship_alive());
        assert_eq!(app.wave().unwrap().lives_remaining(), 2);
    }

    #[test]
    fn test_loss_completes_then_returns_to_title() {
        let mut app = started_app();
        app.wave.as_mut().unwrap().outcome = WaveOutcome::Lost;

        app.update(&AppInput::default(), FRAME);
        assert_eq!(app.state(), AppState::Complete);
        assert_eq!(app.message(), Some("Game Over :("));

        app.update(&press_start(), FRAME);
        assert_eq!(app.state(), AppState::Inactive);
        assert!(app.wave().is_none());
    }

    #[test]
    fn test_win_message() {
        let mut app = started_app();
        app.wave.as_mut().unwrap().outcome = WaveOutcome::Won;
        app.update(&AppInput::default(), FRAME);
        assert_eq!(app.state(), AppState::Complete);
        assert_eq!(app.message(), Some("you win :)"));
    }

    #[test]
    fn test_transition_table() {
        use AppState::*;
        let idle = Signals::default();
        let start = Signals {
            start_pressed: true,
            ..idle
        };
        let resume = Signals {
            continue_pressed: true,
            ..idle
        };
        let playing = Signals {
            outcome: Some(WaveOutcome::InProgress),
            ..idle
        };

        assert_eq!(Inactive.next(&idle), Inactive);
        assert_eq!(Inactive.next(&start), NewWave);
        assert_eq!(NewWave.next(&idle), Active);
        assert_eq!(Active.next(&playing), Active);
        assert_eq!(
            Active.next(&Signals {
                ship_down: true,
                ..playing
            }),
            Paused
        );
        assert_eq!(Active.next(&idle), Inactive);
        assert_eq!(Paused.next(&start), Paused);
        assert_eq!(Paused.next(&resume), Continue);
        assert_eq!(Continue.next(&idle), Active);
        assert_eq!(Complete.next(&resume), Complete);
        assert_eq!(Complete.next(&start), Inactive);
    }

    #[test]
    fn test_outcome_beats_ship_down() {
        let signals = Signals {
            outcome: Some(WaveOutcome::Lost),
            ship_down: true,
            ..Default::default()
        };
        assert_eq!(AppState::Active.next(&signals), AppState::Complete);
    }
}
