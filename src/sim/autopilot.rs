//! Demo-mode pilot used by the headless runner
//!
//! Flaps whenever the head sinks below the center of the next opening.

use super::state::GameState;

/// How far below the target the head may sink before flapping
const FLAP_MARGIN: f32 = 20.0;

/// Vertical position the pilot is steering toward
pub fn target_y(state: &GameState) -> f32 {
    let tuning = &state.tuning;
    let clear_of = tuning.bird_x - tuning.bird_radius;
    state
        .pipes
        .iter()
        .find(|p| p.right(tuning.pipe_width) > clear_of)
        .map(|p| p.gap_top + tuning.pipe_gap / 2.0)
        .unwrap_or(state.playfield.height / 2.0)
}

/// Whether the pilot wants to flap this frame
pub fn wants_flap(state: &GameState) -> bool {
    state.bird.velocity >= 0.0 && state.bird.y > target_y(state) + FLAP_MARGIN
}
