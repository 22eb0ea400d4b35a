//! Space Invaded entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! wasm build drives the simulation from requestAnimationFrame and mirrors
//! it into the DOM HUD; the native build runs a short headless session with
//! a scripted pilot, mostly useful for profiling and sanity checks.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use space_invaded::audio::{AudioManager, SoundEffect};
    use space_invaded::hud::HudSnapshot;
    use space_invaded::sim::{GameEvent, GameState, TickInput, tick};
    use space_invaded::{HighScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        audio: AudioManager,
        high_score: HighScore,
        last_time: f64,
        last_hud: Option<HudSnapshot>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let high_score = HighScore::load();
            let settings = Settings::load();
            let mut state = GameState::new(seed);
            state.high_score = high_score.score;

            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);

            Self {
                state,
                input: TickInput::default(),
                audio,
                high_score,
                last_time: 0.0,
                last_hud: None,
            }
        }

        fn frame(&mut self, time_ms: f64) {
            let dt = if self.last_time > 0.0 {
                ((time_ms - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time_ms;

            tick(&mut self.state, &self.input, dt);

            // One-shot inputs are consumed by the tick they were sampled in
            self.input.fire_pressed = false;
            self.input.pause = false;
            self.input.confirm = false;

            for event in self.state.drain_events() {
                self.dispatch(&event);
            }

            let hud = HudSnapshot::capture(&self.state);
            if self.last_hud.as_ref() != Some(&hud) {
                render_hud(&hud);
                self.last_hud = Some(hud);
            }
        }

        fn dispatch(&mut self, event: &GameEvent) {
            if let Some(cue) = SoundEffect::for_event(event) {
                self.audio.play(cue);
            }
            if let GameEvent::HighScore(score) = event {
                if self.high_score.record(*score) {
                    self.high_score.save();
                }
            }
        }
    }

    /// Push the snapshot into the overlay elements, if they exist
    fn render_hud(hud: &HudSnapshot) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let set = |id: &str, text: &str| {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        };
        set("score-val", &hud.score.to_string());
        set("highscore-val", &hud.high_score.to_string());
        set("wave-val", &hud.wave.to_string());
        set("lives-val", &format!("{}/{}", hud.lives, hud.max_lives));
        set("combo-val", &hud.combo_label());
        set(
            "shield-val",
            &if hud.shield_hits > 0 {
                format!("SHIELD: {}", hud.shield_hits)
            } else {
                String::new()
            },
        );
        set(
            "powerup-val",
            &hud.powerup
                .map(|p| p.kind.def().name.to_string())
                .unwrap_or_default(),
        );
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = true,
                    "ArrowRight" | "d" | "D" => g.input.right = true,
                    " " => {
                        g.input.fire = true;
                        g.input.fire_pressed = true;
                        g.audio.resume();
                        event.prevent_default();
                    }
                    "Enter" => {
                        g.input.confirm = true;
                        g.audio.resume();
                    }
                    "Escape" | "p" | "P" => g.input.pause = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = false,
                    "ArrowRight" | "d" | "D" => g.input.right = false,
                    " " => g.input.fire = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let seed = js_sys::Date::now() as u64;
        log::info!("Space Invaded starting (seed {seed})");

        let game = Rc::new(RefCell::new(Game::new(seed)));
        setup_keyboard(game.clone());

        // requestAnimationFrame loop; the closure re-schedules itself
        let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(Closure::new(move |time_ms: f64| {
            game.borrow_mut().frame(time_ms);
            request_frame(f.borrow().as_ref().unwrap_throw());
        }));
        request_frame(g.borrow().as_ref().unwrap_throw());
    }

    fn request_frame(closure: &Closure<dyn FnMut(f64)>) {
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use space_invaded::audio::{AudioManager, SoundEffect};
    use space_invaded::consts::FRAME_DT;
    use space_invaded::hud::HudSnapshot;
    use space_invaded::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use space_invaded::HighScore;

    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Space Invaded (headless) starting with seed {seed}");

    let mut high_score = HighScore::load();
    let mut state = GameState::new(seed);
    state.high_score = high_score.score;
    let audio = AudioManager::new();

    // Scripted pilot: confirm through menus, sweep left and right, hold
    // fire. Runs a fixed minute of simulated time.
    let frames = 60 * 60;
    let mut shots = 0u32;
    let mut kills = 0u32;

    for frame in 0..frames {
        let input = TickInput {
            confirm: state.phase == GamePhase::Menu,
            left: frame % 240 < 100,
            right: frame % 240 >= 140,
            fire: state.phase == GamePhase::Playing,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);

        for event in state.drain_events() {
            if let Some(cue) = SoundEffect::for_event(&event) {
                audio.play(cue);
            }
            match event {
                GameEvent::Shoot => shots += 1,
                GameEvent::Explosion { .. } => kills += 1,
                GameEvent::HighScore(score) => {
                    high_score.record(score);
                }
                GameEvent::WaveCompleted => {
                    log::info!("wave {} cleared at frame {frame}", state.wave)
                }
                GameEvent::GameOver => log::info!("game over at frame {frame}"),
                _ => {}
            }
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    high_score.save();

    let hud = HudSnapshot::capture(&state);
    log::info!(
        "session ended: score {} (best {}), wave {}, {} shots, {} explosions",
        hud.score,
        hud.high_score,
        hud.wave,
        shots,
        kills
    );
}
