//! Per-frame simulation tick
//!
//! Hook motion and gravity are fixed per tick; only spawning consumes the
//! real frame delta.

use super::collision::first_collision;
use super::spawn::update_spawner;
use super::state::{Crash, GameEvent, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (space/arrow/tap), applied before gravity
    pub flap: bool,
}

/// Advance the game state by one frame.
///
/// Returns the crash the first time one happens. A crashed state is frozen:
/// later calls do nothing until [`GameState::reset`].
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) -> Option<Crash> {
    if state.is_crashed() {
        return None;
    }

    state.time_ticks += 1;

    if input.flap {
        state.flap();
        state.events.push(GameEvent::Flapped);
    }

    // Integrate
    state.bird.velocity += state.tuning.gravity;
    state.bird.y += state.bird.velocity;

    let speed = state.tuning.speed;
    for pipe in &mut state.pipes {
        pipe.x -= speed;
    }

    // Score each hook once, when its left edge reaches the head
    let bird_x = state.tuning.bird_x;
    for pipe in state.pipes.iter_mut().filter(|p| !p.passed) {
        if pipe.x <= bird_x {
            pipe.passed = true;
            state.score += 1;
            state.events.push(GameEvent::Scored { score: state.score });
            log::debug!("Cleared hook, score {}", state.score);
        }
    }

    if let Some(cause) = first_collision(state) {
        let crash = Crash {
            cause,
            score: state.score,
            y: state.bird.y,
        };
        state.crash = Some(crash);
        state.events.push(GameEvent::Crashed(crash));
        return Some(crash);
    }

    let width = state.tuning.pipe_width;
    state.pipes.retain(|p| p.right(width) >= 0.0);

    if let Some(gap_top) = update_spawner(state, dt_ms) {
        state.events.push(GameEvent::PipeSpawned { gap_top });
    }

    None
}
