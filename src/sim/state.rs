//! Game state and core simulation types
//!
//! Everything an attempt needs to advance lives here. Decorative state
//! (splatters) is deliberately absent; see `crate::effects`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// The player's frozen head
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Vertical center (screen coordinates, down is positive)
    pub y: f32,
    /// Vertical velocity per tick
    pub velocity: f32,
}

impl Bird {
    pub fn new(start_y: f32) -> Self {
        Self {
            y: start_y,
            velocity: 0.0,
        }
    }
}

/// A hook/spike column with an opening between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Bottom of the upper (hook) segment
    pub gap_top: f32,
    /// Set once the head has cleared the column
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f32, gap_top: f32) -> Self {
        Self {
            x,
            gap_top,
            passed: false,
        }
    }

    /// Top of the lower (spike) segment
    #[inline]
    pub fn gap_bottom(&self, gap: f32) -> f32 {
        self.gap_top + gap
    }

    /// Right edge
    #[inline]
    pub fn right(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// Visible area, resized by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

/// What ended the attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Hit a hook or spike column
    Pipe,
    /// Left the playfield through the ceiling or floor
    Bounds,
}

/// Terminal collision report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crash {
    pub cause: CrashCause,
    /// Score at the moment of the crash
    pub score: u64,
    /// Head position when it crashed
    pub y: f32,
}

/// Things that happened during a tick, drained by the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Flapped,
    PipeSpawned { gap_top: f32 },
    Scored { score: u64 },
    Crashed(Crash),
}

/// Complete gameplay state for one attempt
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub playfield: Playfield,
    pub bird: Bird,
    /// Active hooks in spawn order (oldest first)
    pub pipes: Vec<Pipe>,
    pub score: u64,
    /// Milliseconds since the last spawn
    pub spawn_timer_ms: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set by the tick that crashed; no further ticks mutate the state
    pub crash: Option<Crash>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let playfield = Playfield {
            width: tuning.playfield_width,
            height: tuning.playfield_height,
        };
        Self {
            seed,
            bird: Bird::new(tuning.bird_start_y),
            tuning,
            playfield,
            pipes: Vec::new(),
            score: 0,
            spawn_timer_ms: 0.0,
            time_ticks: 0,
            crash: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Return to the start-of-attempt state. The playfield and RNG stream
    /// carry over so consecutive attempts see different hooks.
    pub fn reset(&mut self) {
        self.bird = Bird::new(self.tuning.bird_start_y);
        self.pipes.clear();
        self.score = 0;
        self.spawn_timer_ms = 0.0;
        self.time_ticks = 0;
        self.crash = None;
        self.events.clear();
    }

    /// Apply the jump impulse. Prior velocity is discarded.
    pub fn flap(&mut self) {
        self.bird.velocity = self.tuning.jump;
    }

    pub fn is_crashed(&self) -> bool {
        self.crash.is_some()
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.playfield = Playfield { width, height };
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
