//! Frame timing from host timestamps

/// Turns the host's animation-frame timestamps into per-frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Milliseconds since the previous call. The first call after
    /// construction or [`reset`](Self::reset) yields zero, as does a
    /// timestamp that runs backwards.
    pub fn delta(&mut self, timestamp_ms: f64) -> f32 {
        let delta = match self.last {
            Some(last) if timestamp_ms > last => (timestamp_ms - last) as f32,
            _ => 0.0,
        };
        self.last = Some(timestamp_ms);
        delta
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
