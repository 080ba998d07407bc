//! Gameplay simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Seeded RNG only
//! - Hooks iterated in spawn order
//! - Never reads decorative effects

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circle_hits_pipe, first_collision, out_of_bounds};
pub use spawn::{gap_top_range, roll_gap_top, update_spawner};
pub use state::{Bird, Crash, CrashCause, GameEvent, GameState, Pipe, Playfield};
pub use tick::{TickInput, tick};
