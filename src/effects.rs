//! Decorative splatter particles
//!
//! Splatters are purely visual. They may read a crash report but nothing in
//! `sim` ever reads them, so they cannot influence gameplay.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::CrashCause;

/// Alpha lost per frame
pub const FADE_PER_FRAME: f32 = 0.01;

/// Scatter half-extent around the head
const SCATTER: f32 = 20.0;

/// A fading blood blot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splatter {
    pub pos: Vec2,
    /// Radius
    pub size: f32,
    /// 1.0 = opaque, removed at 0
    pub alpha: f32,
}

/// Burst shape for a crash cause: (count, min size, size spread)
fn burst_profile(cause: CrashCause) -> (usize, f32, f32) {
    match cause {
        CrashCause::Pipe => (15, 5.0, 25.0),
        CrashCause::Bounds => (10, 10.0, 30.0),
    }
}

/// Owns all live splatters and the RNG used to scatter them
#[derive(Debug, Clone)]
pub struct Effects {
    splatters: Vec<Splatter>,
    rng: Pcg32,
    max_splatters: usize,
}

impl Effects {
    pub fn new(seed: u64, max_splatters: usize) -> Self {
        Self {
            splatters: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            max_splatters,
        }
    }

    pub fn splatters(&self) -> &[Splatter] {
        &self.splatters
    }

    pub fn is_empty(&self) -> bool {
        self.splatters.is_empty()
    }

    pub fn clear(&mut self) {
        self.splatters.clear();
    }

    /// Change the particle cap, dropping the oldest splatters if over it
    pub fn set_limit(&mut self, max_splatters: usize) {
        self.max_splatters = max_splatters;
        self.enforce_limit();
    }

    /// Spray splatters around the crash point
    pub fn burst(&mut self, origin: Vec2, cause: CrashCause) {
        let (count, min_size, spread) = burst_profile(cause);
        for _ in 0..count {
            let offset = Vec2::new(
                self.rng.random_range(-SCATTER..SCATTER),
                self.rng.random_range(-SCATTER..SCATTER),
            );
            self.splatters.push(Splatter {
                pos: origin + offset,
                size: min_size + self.rng.random::<f32>() * spread,
                alpha: 1.0,
            });
        }
        self.enforce_limit();
    }

    /// Fade every splatter by one frame and drop the invisible ones
    pub fn update(&mut self) {
        for splatter in &mut self.splatters {
            splatter.alpha -= FADE_PER_FRAME;
        }
        self.splatters.retain(|s| s.alpha > 0.0);
    }

    fn enforce_limit(&mut self) {
        if self.splatters.len() > self.max_splatters {
            let excess = self.splatters.len() - self.max_splatters;
            self.splatters.drain(..excess);
        }
    }
}
