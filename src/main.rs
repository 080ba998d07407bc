//! Freezer Challenge entry point
//!
//! On the web this wires animation frames, keyboard and touch into a
//! `Session`. Natively there is no renderer, so the binary runs a headless
//! demo attempt with the autopilot and reports the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, TouchEvent};

    use freezer_challenge::platform::input::{InputEvent, Key};
    use freezer_challenge::platform::storage::LocalStore;
    use freezer_challenge::session::Phase;
    use freezer_challenge::sim::GameEvent;
    use freezer_challenge::{Session, Settings, Tuning};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStore>,
        /// Pending requestAnimationFrame handle, if any
        frame_id: Option<i32>,
    }

    fn window() -> Result<web_sys::Window, JsValue> {
        web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
    }

    fn window_size(window: &web_sys::Window) -> (f32, f32) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(freezer_challenge::consts::PLAYFIELD_WIDTH as f64);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(freezer_challenge::consts::PLAYFIELD_HEIGHT as f64);
        (w as f32, h as f32)
    }

    fn request_frame(callback: &FrameCallback) -> Option<i32> {
        let window = web_sys::window()?;
        let callback = callback.borrow();
        let closure = callback.as_ref()?;
        window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok()
    }

    /// Subscribe to animation frames if the session needs them and we are
    /// not already subscribed
    fn ensure_frames(game: &mut Game, callback: &FrameCallback) {
        if game.session.wants_frames() && game.frame_id.is_none() {
            game.frame_id = request_frame(callback);
        }
    }

    /// Update HUD elements in DOM
    fn update_hud(session: &Session<LocalStore>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let view = session.view();

        if let Some(el) = document.get_element_by_id("hud-score") {
            el.set_text_content(Some(&view.score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("hud-best") {
            el.set_text_content(Some(&view.high_score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("overlay") {
            let (class, text) = match view.phase {
                Phase::NotStarted => ("overlay", "Tap to fly. Avoid the hooks.".to_string()),
                Phase::Running => ("overlay hidden", String::new()),
                Phase::Ended { score } if session.is_new_best() => {
                    ("overlay", format!("Frozen solid. New best: {}", score))
                }
                Phase::Ended { score } => ("overlay", format!("Frozen solid. Score: {}", score)),
            };
            let _ = el.set_attribute("class", class);
            el.set_text_content(Some(&text));
        }
    }

    fn press(game: &Rc<RefCell<Game>>, callback: &FrameCallback, event: InputEvent) -> bool {
        let mut g = game.borrow_mut();
        let pressed = g.session.handle(&event);
        ensure_frames(&mut g, callback);
        update_hud(&g.session);
        pressed
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let window = window()?;
        let mut store = LocalStore::open();
        let settings = Settings::load(&store);
        // Write back so a fresh browser gets the defaults on disk
        if let Err(e) = settings.save(&mut store) {
            log::warn!("Failed to save settings: {}", e);
        }

        let seed = js_sys::Date::now() as u64;
        let mut session = Session::new(Tuning::default(), settings, store, seed);
        let (w, h) = window_size(&window);
        session.resize(w, h);
        log::info!("Freezer Challenge starting ({}x{}, seed {})", w, h, seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            frame_id: None,
        }));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        // Animation frame loop. Stops re-subscribing once the session no
        // longer wants frames.
        {
            let game = game.clone();
            let callback_handle = callback.clone();
            *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
                let mut g = game.borrow_mut();
                g.frame_id = None;
                g.session.frame(timestamp);
                for event in g.session.drain_events() {
                    match event {
                        GameEvent::Scored { score } => log::debug!("Score {}", score),
                        GameEvent::Crashed(crash) => log::debug!("Crashed into {:?}", crash.cause),
                        GameEvent::Flapped | GameEvent::PipeSpawned { .. } => {}
                    }
                }
                update_hud(&g.session);
                ensure_frames(&mut g, &callback_handle);
            }));
        }

        // Keyboard
        {
            let game = game.clone();
            let callback = callback.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = Key::from_code(&event.code());
                if press(&game, &callback, InputEvent::KeyDown(key)) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let callback = callback.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                press(&game, &callback, InputEvent::TouchStart);
            });
            window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Resize
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(window) = web_sys::window() {
                    let (w, h) = window_size(&window);
                    game.borrow_mut().session.resize(w, h);
                }
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        update_hud(&game.borrow().session);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use freezer_challenge::platform::storage::{FileStore, MemoryStore};

    env_logger::init();
    log::info!("Freezer Challenge (native) starting...");
    log::info!("Native mode has no renderer - running a headless autopilot attempt");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let tuning = match std::env::var("FREEZER_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| freezer_challenge::Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Bad tuning file {}: {}", path, e);
                std::process::exit(1);
            }
        },
        Err(_) => freezer_challenge::Tuning::default(),
    };
    let store_path =
        std::env::var("FREEZER_STORE").unwrap_or_else(|_| "freezer-challenge.json".to_string());

    match FileStore::open(&store_path) {
        Ok(store) => headless::run(tuning, store, seed),
        Err(e) => {
            log::warn!("Could not open {}: {} - high score will not persist", store_path, e);
            headless::run(tuning, MemoryStore::new(), seed)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use freezer_challenge::platform::storage::KeyValueStore;
    use freezer_challenge::sim::GameEvent;
    use freezer_challenge::sim::autopilot::wants_flap;
    use freezer_challenge::{QualityPreset, Session, Settings, Tuning};

    /// Simulated display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after two minutes of simulated play
    const MAX_FRAMES: u32 = 60 * 120;

    pub fn run<S: KeyValueStore>(tuning: Tuning, store: S, seed: u64) {
        let settings = Settings::load(&store);
        let mut session = Session::new(tuning, settings, store, seed);

        if let Ok(name) = std::env::var("FREEZER_QUALITY") {
            match name.parse::<QualityPreset>() {
                Ok(preset) => {
                    log::info!("Quality preset {}", preset.as_str());
                    session.update_settings(Settings::from_preset(preset))
                }
                Err(e) => log::warn!("Ignoring FREEZER_QUALITY: {}", e),
            }
        }

        session.press();
        let mut t = 0.0;
        let mut flaps = 0u32;
        for _ in 0..MAX_FRAMES {
            if wants_flap(session.state()) {
                session.press();
            }
            t += FRAME_MS;
            let crash = session.frame(t);

            for event in session.drain_events() {
                match event {
                    GameEvent::Flapped => flaps += 1,
                    GameEvent::Scored { score } => log::debug!("Score {}", score),
                    GameEvent::PipeSpawned { .. } | GameEvent::Crashed(_) => {}
                }
            }

            if crash.is_some() {
                break;
            }
        }

        let view = session.view();
        println!(
            "seed {}: score {} after {:.1}s and {} flaps (best {}){}",
            seed,
            view.score,
            t / 1000.0,
            flaps,
            view.high_score,
            if session.is_running() { " - survived" } else { "" }
        );
    }
}
