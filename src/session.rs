//! Session lifecycle
//!
//! Owns the game state, the splatters, the frame clock and the store. Input
//! never touches the simulation directly: a press while running only queues
//! a flap that the next frame consumes.

use glam::Vec2;

use crate::effects::Effects;
use crate::highscores::HighScore;
use crate::platform::input::InputEvent;
use crate::platform::storage::KeyValueStore;
use crate::platform::time::FrameClock;
use crate::settings::Settings;
use crate::sim::{Crash, GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::view::FrameView;

/// Where the player is in the start / play / game-over loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Title screen, nothing simulated yet
    NotStarted,
    /// An attempt is in progress
    Running,
    /// The last attempt crashed with this score
    Ended { score: u64 },
}

pub struct Session<S: KeyValueStore> {
    state: GameState,
    effects: Effects,
    phase: Phase,
    clock: FrameClock,
    pending: TickInput,
    high_score: HighScore,
    new_best: bool,
    settings: Settings,
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(tuning: Tuning, settings: Settings, store: S, seed: u64) -> Self {
        let high_score = HighScore::load(&store);
        Self {
            state: GameState::new(tuning, seed),
            // Decorrelate splatter scatter from hook placement
            effects: Effects::new(seed ^ 0x9e37_79b9_7f4a_7c15, settings.max_particles()),
            phase: Phase::NotStarted,
            clock: FrameClock::new(),
            pending: TickInput::default(),
            high_score,
            new_best: false,
            settings,
            store,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    /// Whether the last attempt set a new best
    pub fn is_new_best(&self) -> bool {
        self.new_best
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether the host should keep delivering animation frames. Gameplay
    /// only ticks while running; after a crash frames continue just long
    /// enough to fade the splatters out.
    pub fn wants_frames(&self) -> bool {
        self.is_running() || !self.effects.is_empty()
    }

    /// Begin a fresh attempt from the title screen or after a crash.
    /// Ignored while an attempt is running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.state.reset();
        self.effects.clear();
        self.clock.reset();
        self.pending = TickInput::default();
        self.new_best = false;
        self.phase = Phase::Running;
        log::info!("Attempt started (best {})", self.high_score.best());
    }

    /// Start again after a crash
    pub fn restart(&mut self) {
        if matches!(self.phase, Phase::Ended { .. }) {
            self.start();
        }
    }

    /// The game's single button: flap while running, otherwise start
    pub fn press(&mut self) {
        if self.is_running() {
            self.pending.flap = true;
        } else {
            self.start();
        }
    }

    /// Feed a raw input event. Returns true if it was a press.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        if !event.is_press() {
            return false;
        }
        self.press();
        true
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Apply new settings and persist them
    pub fn update_settings(&mut self, settings: Settings) {
        self.effects.set_limit(settings.max_particles());
        if let Err(e) = settings.save(&mut self.store) {
            log::warn!("Failed to save settings: {}", e);
        }
        self.settings = settings;
    }

    /// Advance one animation frame. Returns the crash if this frame ended
    /// the attempt.
    pub fn frame(&mut self, timestamp_ms: f64) -> Option<Crash> {
        let dt_ms = self.clock.delta(timestamp_ms);
        self.effects.update();

        if !self.is_running() {
            return None;
        }

        let input = std::mem::take(&mut self.pending);
        let crash = tick(&mut self.state, &input, dt_ms)?;
        self.end(crash);
        Some(crash)
    }

    /// Drain gameplay events since the last call (for sound cues etc.)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView::new(self)
    }

    fn end(&mut self, crash: Crash) {
        self.phase = Phase::Ended { score: crash.score };
        self.effects.burst(
            Vec2::new(self.state.tuning.bird_x, crash.y),
            crash.cause,
        );

        self.new_best = self.high_score.record(crash.score);
        if self.new_best {
            log::info!("New high score: {}", crash.score);
            if let Err(e) = self.high_score.save(&mut self.store) {
                log::warn!("Failed to save high score: {}", e);
            }
        }

        log::info!(
            "Game over ({:?}) with score {} (best {})",
            crash.cause,
            crash.score,
            self.high_score.best()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::STORAGE_KEY;
    use crate::platform::input::Key;
    use crate::platform::storage::{MemoryStore, StorageError};
    use crate::sim::{CrashCause, Pipe};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn session_with(store: MemoryStore) -> Session<MemoryStore> {
        Session::new(Tuning::default(), Settings::default(), store, 77)
    }

    fn session() -> Session<MemoryStore> {
        session_with(MemoryStore::new())
    }

    /// Run frames until the attempt ends, returning the crash
    fn run_until_crash(session: &mut Session<MemoryStore>, t: &mut f64) -> Crash {
        for _ in 0..10_000 {
            *t += FRAME_MS;
            if let Some(crash) = session.frame(*t) {
                return crash;
            }
        }
        panic!("never crashed");
    }

    #[test]
    fn test_starts_not_started() {
        let mut s = session();
        assert_eq!(s.phase(), Phase::NotStarted);
        assert!(!s.wants_frames());
        // Frames before start simulate nothing
        s.frame(0.0);
        s.frame(FRAME_MS);
        assert_eq!(s.state().bird.y, 300.0);
        assert_eq!(s.state().time_ticks, 0);
    }

    #[test]
    fn test_press_starts_then_flaps() {
        let mut s = session();
        s.press();
        assert_eq!(s.phase(), Phase::Running);
        assert!(s.wants_frames());
        // Starting does not also queue a flap
        s.frame(1000.0);
        assert!((s.state().bird.velocity - 0.6).abs() < 1e-6);

        s.press();
        // Queued, not yet applied
        assert!((s.state().bird.velocity - 0.6).abs() < 1e-6);
        s.frame(1000.0 + FRAME_MS);
        assert!((s.state().bird.velocity - (-7.4)).abs() < 1e-5);

        // Consumed once
        s.frame(1000.0 + 2.0 * FRAME_MS);
        assert!((s.state().bird.velocity - (-6.8)).abs() < 1e-5);
    }

    #[test]
    fn test_handle_maps_keys() {
        let mut s = session();
        assert!(!s.handle(&InputEvent::KeyDown(Key::Other)));
        assert_eq!(s.phase(), Phase::NotStarted);
        assert!(s.handle(&InputEvent::TouchStart));
        assert_eq!(s.phase(), Phase::Running);
    }

    #[test]
    fn test_crash_ends_and_records_best() {
        let mut s = session();
        s.start();
        let mut t = 0.0;
        let crash = run_until_crash(&mut s, &mut t);

        // Free fall from the middle ends on the floor with no score
        assert_eq!(crash.cause, CrashCause::Bounds);
        assert_eq!(s.phase(), Phase::Ended { score: 0 });
        assert!(!s.is_new_best());
        assert_eq!(s.effects().splatters().len(), 10);

        // Frames after the crash leave the state alone
        let frozen_y = s.state().bird.y;
        t += FRAME_MS;
        assert!(s.frame(t).is_none());
        assert_eq!(s.state().bird.y, frozen_y);
    }

    #[test]
    fn test_high_score_persists_and_never_drops() {
        let mut s = session();
        let mut t = 0.0;

        s.start();
        s.state.score = 5;
        run_until_crash(&mut s, &mut t);
        assert!(s.is_new_best());
        assert_eq!(s.high_score(), 5);
        assert_eq!(s.store().get(STORAGE_KEY).as_deref(), Some("5"));

        s.restart();
        assert_eq!(s.state().score, 0);
        s.state.score = 2;
        let crash = run_until_crash(&mut s, &mut t);
        assert_eq!(crash.score, 2);
        assert!(!s.is_new_best());
        assert_eq!(s.high_score(), 5);
        assert_eq!(s.store().get(STORAGE_KEY).as_deref(), Some("5"));
    }

    #[test]
    fn test_loads_existing_best() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "31").unwrap();
        assert_eq!(session_with(store).high_score(), 31);

        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "garbage").unwrap();
        assert_eq!(session_with(store).high_score(), 0);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut s = session();
        let mut t = 0.0;
        s.start();
        s.state.pipes.push(Pipe::new(500.0, 100.0));
        s.state.score = 3;
        run_until_crash(&mut s, &mut t);
        assert!(!s.effects().is_empty());

        // Restart is only meaningful after a crash
        s.restart();
        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(s.state().score, 0);
        assert!(s.state().pipes.is_empty());
        assert_eq!(s.state().bird.y, 300.0);
        assert_eq!(s.state().bird.velocity, 0.0);
        assert_eq!(s.state().spawn_timer_ms, 0.0);
        assert!(s.effects().is_empty());

        // First frame after restart sees a zero delta even with a big gap
        s.frame(t + 60_000.0);
        assert_eq!(s.state().spawn_timer_ms, 0.0);
    }

    #[test]
    fn test_start_ignored_while_running() {
        let mut s = session();
        s.start();
        s.frame(0.0);
        s.frame(FRAME_MS);
        let ticks = s.state().time_ticks;
        s.start();
        assert_eq!(s.state().time_ticks, ticks);
    }

    #[test]
    fn test_frames_continue_until_splatters_fade() {
        let mut s = session();
        let mut t = 0.0;
        s.start();
        run_until_crash(&mut s, &mut t);
        assert!(s.wants_frames());
        for _ in 0..110 {
            t += FRAME_MS;
            s.frame(t);
        }
        assert!(!s.wants_frames());
    }

    #[test]
    fn test_particles_disabled() {
        let mut s = session();
        s.update_settings(Settings {
            particles: false,
            ..Settings::default()
        });
        let mut t = 0.0;
        s.start();
        run_until_crash(&mut s, &mut t);
        assert!(s.effects().is_empty());
        assert!(!s.wants_frames());
        assert!(!s.settings().particles);
    }

    #[test]
    fn test_drained_events_do_not_accumulate() {
        let mut s = session();
        let mut t = 0.0;
        let mut flapped = false;
        let mut spawned = false;
        s.start();
        // A minute of autopilot play, draining once per frame
        for _ in 0..3600 {
            if crate::sim::autopilot::wants_flap(s.state()) {
                s.press();
            }
            t += FRAME_MS;
            let crashed = s.frame(t).is_some();
            let events = s.drain_events();
            assert!(events.len() <= 4);
            for event in events {
                match event {
                    GameEvent::Flapped => flapped = true,
                    GameEvent::PipeSpawned { .. } => spawned = true,
                    GameEvent::Scored { .. } | GameEvent::Crashed(_) => {}
                }
            }
            assert!(s.state().events.is_empty());
            if crashed {
                break;
            }
        }
        assert!(flapped);
        assert!(spawned);
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }
    }

    #[test]
    fn test_broken_store_does_not_interrupt() {
        let mut s = Session::new(Tuning::default(), Settings::default(), BrokenStore, 1);
        s.start();
        s.state.score = 9;
        let mut t = 0.0;
        let mut crash = None;
        for _ in 0..1000 {
            t += FRAME_MS;
            if let Some(c) = s.frame(t) {
                crash = Some(c);
                break;
            }
        }
        assert_eq!(crash.map(|c| c.score), Some(9));
        assert_eq!(s.high_score(), 9);
        s.restart();
        assert!(s.is_running());
    }
}
