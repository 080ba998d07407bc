//! Freezer Challenge - a one-button arcade game
//!
//! Core modules:
//! - `sim`: Gameplay simulation (physics, collisions, spawning, scoring)
//! - `effects`: Decorative splatter particles (never read by `sim`)
//! - `session`: Start/run/end lifecycle and high-score bookkeeping
//! - `platform`: Frame clock, input mapping, key-value storage
//! - `view`: Read-only snapshot for whatever draws the frame
//! - `tuning`: Data-driven game balance

pub mod effects;
pub mod highscores;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod view;

pub use highscores::HighScore;
pub use session::{Phase, Session};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Downward acceleration added to the head's velocity every tick
    pub const GRAVITY: f32 = 0.6;
    /// Velocity assigned on a flap (negative is up)
    pub const JUMP: f32 = -8.0;
    /// Horizontal distance hooks travel per tick
    pub const SPEED: f32 = 3.5;

    /// Hook column width
    pub const PIPE_WIDTH: f32 = 60.0;
    /// Vertical opening between the hanging hook and the spikes
    pub const PIPE_GAP: f32 = 160.0;
    /// Shortest allowed hook/spike segment above or below the gap
    pub const MIN_PIPE_HEIGHT: f32 = 50.0;
    /// Wall-clock time between hook spawns (ms)
    pub const PIPE_SPAWN_INTERVAL_MS: f32 = 1500.0;

    /// Fixed horizontal position of the head
    pub const BIRD_X: f32 = 50.0;
    pub const BIRD_RADIUS: f32 = 15.0;
    pub const BIRD_START_Y: f32 = 300.0;

    /// Default playfield size (the host usually resizes to the window)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
}
