//! Read-only frame snapshot for presentation
//!
//! Whatever draws the game gets everything it needs from [`FrameView`] and
//! has no way to mutate the session through it.

use std::f32::consts::FRAC_PI_4;

use crate::effects::Splatter;
use crate::platform::storage::KeyValueStore;
use crate::session::{Phase, Session};
use crate::sim::{Pipe, Playfield};

/// Head rotation from vertical velocity, clamped to ±45°
pub fn tilt(velocity: f32) -> f32 {
    (velocity * 0.1).clamp(-FRAC_PI_4, FRAC_PI_4)
}

/// Screen-edge frost that thickens as the score climbs
pub fn frost_intensity(score: u64) -> f32 {
    (0.1 + score as f32 * 0.01).min(0.4)
}

/// One hook column in drawable terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeView {
    pub x: f32,
    pub width: f32,
    /// Bottom of the hanging chain/hook
    pub gap_top: f32,
    /// Top of the spike bed
    pub gap_bottom: f32,
}

#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    pub phase: Phase,
    pub playfield: Playfield,
    /// The head is only drawn while an attempt is running
    pub show_bird: bool,
    pub bird_x: f32,
    pub bird_y: f32,
    pub bird_radius: f32,
    pub tilt: f32,
    pub score: u64,
    pub high_score: u64,
    pub frost: f32,
    pub splatters: &'a [Splatter],
    pipes: &'a [Pipe],
    pipe_width: f32,
    pipe_gap: f32,
}

impl<'a> FrameView<'a> {
    pub fn new<S: KeyValueStore>(session: &'a Session<S>) -> Self {
        let state = session.state();
        let tuning = &state.tuning;
        Self {
            phase: session.phase(),
            playfield: state.playfield,
            show_bird: session.is_running(),
            bird_x: tuning.bird_x,
            bird_y: state.bird.y,
            bird_radius: tuning.bird_radius,
            tilt: tilt(state.bird.velocity),
            score: state.score,
            high_score: session.high_score(),
            frost: frost_intensity(state.score),
            splatters: session.effects().splatters(),
            pipes: &state.pipes,
            pipe_width: tuning.pipe_width,
            pipe_gap: tuning.pipe_gap,
        }
    }

    /// Hook columns, oldest first
    pub fn pipes(&self) -> impl Iterator<Item = PipeView> + '_ {
        self.pipes.iter().map(|p| PipeView {
            x: p.x,
            width: self.pipe_width,
            gap_top: p.gap_top,
            gap_bottom: p.gap_bottom(self.pipe_gap),
        })
    }
}
