//! Basket Drop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use basket_drop::consts::*;
    use basket_drop::renderer::CanvasRenderer;
    use basket_drop::sim::{
        FieldSize, GameEvent, GamePhase, GameState, PointerSample, TickInput, rating_message, tick,
    };
    use basket_drop::{HighScores, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        settings: Settings,
        scores: HighScores,
        // Raw input signals collected between frames
        left_held: bool,
        right_held: bool,
        mouse: Option<PointerSample>,
        touch: Option<PointerSample>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(state: GameState) -> Self {
            Self {
                state,
                renderer: None,
                settings: Settings::load(),
                scores: HighScores::load(),
                left_held: false,
                right_held: false,
                mouse: None,
                touch: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Snapshot the collected signals into this frame's input
        fn tick_input(&self, now_ms: f64) -> TickInput {
            TickInput {
                now_ms,
                left: self.left_held,
                right: self.right_held,
                mouse: self.mouse,
                touch: self.touch,
            }
        }

        /// Run one simulation step and react to its events
        fn update(&mut self, time: f64) {
            let input = self.tick_input(time);
            tick(&mut self.state, &input);

            for event in self.state.events.clone() {
                if let GameEvent::GameOver { score } = event {
                    self.finish_run(score);
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60_000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                if let Err(e) = renderer.render(&self.state, &self.settings) {
                    log::warn!("Render error: {:?}", e);
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_text(&document, "score-display", &self.state.score.to_string());
            set_text(&document, "lives-display", &self.state.lives.max(0).to_string());
            set_text(
                &document,
                "best-display",
                &self.scores.best().unwrap_or(0).to_string(),
            );

            if self.settings.show_fps {
                show(&document, "fps-display");
                set_text(&document, "fps-display", &format!("{} fps", self.fps));
            } else {
                hide(&document, "fps-display");
            }
        }

        /// Record the run and bring up the game-over screen
        fn finish_run(&mut self, score: u32) {
            log::info!("Game over with score {}", score);
            if let Some(rank) = self.scores.record(score, js_sys::Date::now()) {
                log::info!("New high score, rank {}", rank);
                self.scores.save();
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            set_text(&document, "final-score", &score.to_string());
            set_text(&document, "game-over-message", rating_message(score));
            show(&document, "game-over-screen");
        }

        /// (Re)start a run from either idle screen
        fn start_run(&mut self, now_ms: f64) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            hide(&document, "start-screen");
            hide(&document, "game-over-screen");
            self.state.start(now_ms);
            log::info!("Session started (seed {})", self.state.seed);
        }
    }

    // --- DOM helpers ---

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show(document: &Document, id: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().remove_1("hidden");
        }
    }

    fn hide(document: &Document, id: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().add_1("hidden");
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Basket Drop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        // The sim validates the field it is given; refuse to start on a bad one
        let field = match FieldSize::new(canvas.width() as f32, canvas.height() as f32) {
            Ok(field) => field,
            Err(e) => {
                log::error!("Bad viewport configuration: {}", e);
                return;
            }
        };

        let seed = js_sys::Date::now() as u64;
        let state = match GameState::new(field, seed) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Bad viewport configuration: {}", e);
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game::new(state)));

        match CanvasRenderer::new(&canvas) {
            Ok(renderer) => game.borrow_mut().renderer = Some(renderer),
            Err(e) => log::warn!("Renderer unavailable: {:?}", e),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_screen_buttons(game.clone());

        log::info!("Basket Drop ready (seed {})", seed);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard held-state plus preference toggles
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if matches!(key.as_str(), "ArrowLeft" | "ArrowRight" | "ArrowUp" | "ArrowDown" | " ") {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                match key.as_str() {
                    "ArrowLeft" | "a" | "A" => g.left_held = true,
                    "ArrowRight" | "d" | "D" => g.right_held = true,
                    "p" | "P" => {
                        g.settings.particles = !g.settings.particles;
                        g.settings.save();
                    }
                    "f" | "F" => {
                        g.settings.show_fps = !g.settings.show_fps;
                        g.settings.save();
                    }
                    "m" | "M" => {
                        g.settings.reduced_motion = !g.settings.reduced_motion;
                        g.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.left_held = false,
                    "ArrowRight" | "d" | "D" => g.right_held = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse movement, scaled into canvas coordinates and timestamped
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let scale = canvas_clone.width() as f64 / rect.width();
                let x = (event.client_x() as f64 - rect.left()) * scale;
                game.borrow_mut().mouse = Some(PointerSample {
                    x: x as f32,
                    at_ms: now_ms(),
                });
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch movement
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let scale = canvas_clone.width() as f64 / rect.width();
                    let x = (touch.client_x() as f64 - rect.left()) * scale;
                    game.borrow_mut().touch = Some(PointerSample {
                        x: x as f32,
                        at_ms: now_ms(),
                    });
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_screen_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        for btn_id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(btn_id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let was_playing = {
                        let mut g = game.borrow_mut();
                        let was_playing = g.state.phase == GamePhase::Playing;
                        g.start_run(now_ms());
                        was_playing
                    };
                    // The previous loop stopped scheduling when the phase left
                    // Playing; a fresh run needs a fresh loop.
                    if !was_playing {
                        request_animation_frame(game.clone());
                    }
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let still_playing = {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
            g.state.phase == GamePhase::Playing
        };

        // The loop self-terminates: once the phase leaves Playing no further
        // frame is requested until a start command spins it up again.
        if still_playing {
            request_animation_frame(game);
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
    use basket_drop::consts::*;
    use basket_drop::sim::{FieldSize, GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Basket Drop (native) starting...");
    log::info!("Native mode is a headless smoke run - build for wasm32 to play");

    let field = match FieldSize::new(FIELD_WIDTH, FIELD_HEIGHT) {
        Ok(field) => field,
        Err(e) => {
            log::error!("Bad viewport configuration: {}", e);
            return;
        }
    };
    let mut state = GameState::new(field, 0xBA5CE7).expect("valid field");
    state.start(0.0);

    // Scripted minute of play: sweep the basket side to side at 60 fps
    for frame in 0..3600u32 {
        let input = TickInput {
            now_ms: frame as f64 * (1000.0 / 60.0),
            left: (frame / 120) % 2 == 0,
            right: (frame / 120) % 2 == 1,
            ..Default::default()
        };
        tick(&mut state, &input);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "Smoke run done: frame={} score={} lives={} balls={} phase={:?}",
        state.frame,
        state.score,
        state.lives,
        state.balls.len(),
        state.phase
    );
}
