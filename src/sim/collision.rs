//! Collision detection between the head and the hooks
//!
//! The head is a circle at a fixed x. A hook column is treated as its full
//! horizontal span; inside that span anything outside the gap is solid.

use glam::Vec2;

use super::state::{CrashCause, GameState, Pipe};

/// Check the head circle against one hook column
pub fn circle_hits_pipe(center: Vec2, radius: f32, pipe: &Pipe, width: f32, gap: f32) -> bool {
    let overlaps_span = center.x + radius > pipe.x && center.x - radius < pipe.right(width);
    if !overlaps_span {
        return false;
    }
    let top = center.y - radius;
    let bottom = center.y + radius;
    top < pipe.gap_top || bottom > pipe.gap_bottom(gap)
}

/// True once the head's center leaves `[0, height]`
#[inline]
pub fn out_of_bounds(y: f32, height: f32) -> bool {
    y > height || y < 0.0
}

/// First terminal collision this tick, if any.
///
/// Hooks are scanned oldest first and take priority over the bounds check.
pub fn first_collision(state: &GameState) -> Option<CrashCause> {
    let tuning = &state.tuning;
    let center = Vec2::new(tuning.bird_x, state.bird.y);

    let hit_pipe = state.pipes.iter().any(|pipe| {
        circle_hits_pipe(center, tuning.bird_radius, pipe, tuning.pipe_width, tuning.pipe_gap)
    });
    if hit_pipe {
        return Some(CrashCause::Pipe);
    }

    if out_of_bounds(state.bird.y, state.playfield.height) {
        return Some(CrashCause::Bounds);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Pipe;
    use crate::tuning::Tuning;

    const R: f32 = 15.0;
    const W: f32 = 60.0;
    const GAP: f32 = 160.0;

    fn head(y: f32) -> Vec2 {
        Vec2::new(50.0, y)
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let pipe = Pipe::new(40.0, 200.0);
        assert!(!circle_hits_pipe(head(280.0), R, &pipe, W, GAP));
        // Touching exactly is not a hit
        assert!(!circle_hits_pipe(head(215.0), R, &pipe, W, GAP));
        assert!(!circle_hits_pipe(head(345.0), R, &pipe, W, GAP));
    }

    #[test]
    fn test_hits_hook_above_gap() {
        let pipe = Pipe::new(40.0, 200.0);
        assert!(circle_hits_pipe(head(214.0), R, &pipe, W, GAP));
    }

    #[test]
    fn test_hits_spikes_below_gap() {
        let pipe = Pipe::new(40.0, 200.0);
        assert!(circle_hits_pipe(head(346.0), R, &pipe, W, GAP));
    }

    #[test]
    fn test_outside_span_is_safe() {
        // Hook entirely to the right: left edge at 65 = head x + radius
        let ahead = Pipe::new(65.0, 200.0);
        assert!(!circle_hits_pipe(head(0.0), R, &ahead, W, GAP));
        // Hook entirely behind: right edge at 35 = head x - radius
        let behind = Pipe::new(-25.0, 200.0);
        assert!(!circle_hits_pipe(head(0.0), R, &behind, W, GAP));
        // One pixel into the span is solid
        let edge = Pipe::new(64.0, 200.0);
        assert!(circle_hits_pipe(head(0.0), R, &edge, W, GAP));
    }

    #[test]
    fn test_bounds() {
        assert!(!out_of_bounds(0.0, 600.0));
        assert!(!out_of_bounds(600.0, 600.0));
        assert!(out_of_bounds(600.5, 600.0));
        assert!(out_of_bounds(-0.1, 600.0));
    }

    #[test]
    fn test_pipe_wins_over_bounds() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.bird.y = 601.0;
        assert_eq!(first_collision(&state), Some(CrashCause::Bounds));

        state.pipes.push(Pipe::new(40.0, 200.0));
        assert_eq!(first_collision(&state), Some(CrashCause::Pipe));
    }

    #[test]
    fn test_clear_sky() {
        let state = GameState::new(Tuning::default(), 1);
        assert_eq!(first_collision(&state), None);
    }
}
