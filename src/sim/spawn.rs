//! Hook spawning on a wall-clock cadence
//!
//! Spawn timing accumulates real frame time while hook motion is a fixed
//! per-tick step, so hook spacing depends on the display refresh rate.

use rand::Rng;

use super::state::{GameState, Pipe};
use crate::tuning::Tuning;

/// Inclusive range of valid `gap_top` values for a playfield height.
///
/// On playfields below [`Tuning::min_viable_height`] the range collapses to
/// `min_pipe_height`.
pub fn gap_top_range(tuning: &Tuning, height: f32) -> (f32, f32) {
    let min = tuning.min_pipe_height;
    let max = height - tuning.pipe_gap - tuning.min_pipe_height;
    (min, max.max(min))
}

/// Pick a whole-pixel gap position uniformly within [`gap_top_range`]
pub fn roll_gap_top<R: Rng>(rng: &mut R, tuning: &Tuning, height: f32) -> f32 {
    let (min, max) = gap_top_range(tuning, height);
    let lo = min.ceil() as i32;
    let hi = max.floor() as i32;
    if hi < lo {
        return min;
    }
    rng.random_range(lo..=hi) as f32
}

/// Accumulate frame time and append a hook at the trailing edge once the
/// interval is exceeded. Returns the new hook's gap position.
pub fn update_spawner(state: &mut GameState, dt_ms: f32) -> Option<f32> {
    state.spawn_timer_ms += dt_ms;
    if state.spawn_timer_ms <= state.tuning.spawn_interval_ms {
        return None;
    }

    let gap_top = roll_gap_top(&mut state.rng, &state.tuning, state.playfield.height);
    state.pipes.push(Pipe::new(state.playfield.width, gap_top));
    state.spawn_timer_ms = 0.0;
    log::debug!(
        "Spawned hook at x={} gap_top={} ({} active)",
        state.playfield.width,
        gap_top,
        state.pipes.len()
    );
    Some(gap_top)
}
