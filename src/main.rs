//! Parallax Runner entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlImageElement, KeyboardEvent};

    use parallax_runner::platform::KeyState;
    use parallax_runner::renderer::{Frame, RenderState, RenderSurface};
    use parallax_runner::sim::{GameEvent, GameState, tick};
    use parallax_runner::{AssetKey, AssetRegistry, Settings, Tuning, assets, highscore};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        /// Written by image onload callbacks, read by the tick
        assets: Rc<RefCell<AssetRegistry>>,
        images: Vec<(AssetKey, HtmlImageElement)>,
        render_state: Option<RenderState>,
        keys: KeyState,
        settings: Settings,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
            let assets = Rc::new(RefCell::new(AssetRegistry::new(&tuning)));
            let high_score = highscore::load();
            Self {
                state: GameState::new(seed, tuning, high_score),
                images: assets::web::spawn_loads(assets.clone()),
                assets,
                render_state: None,
                keys: KeyState::new(),
                settings,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// One simulation step per animation frame
        fn update(&mut self, time: f64) {
            let input = self.keys.snapshot(&self.settings.bindings);
            tick(&mut self.state, &input, &self.assets.borrow());

            for event in self.state.drain_events() {
                match event {
                    GameEvent::NewHighScore(ticks) => highscore::save(ticks),
                    GameEvent::Restarted => log::info!("Restarted (seed {})", self.state.seed),
                    _ => {}
                }
            }

            // Frame time only feeds the FPS readout
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) -> Frame {
            let assets = self.assets.borrow();
            let frame = Frame::capture(&self.state, &assets);

            if let Some(ref mut render_state) = self.render_state {
                for (key, image) in &self.images {
                    if assets.is_loaded(*key) && !render_state.has_texture(*key) {
                        render_state.upload_image(*key, image);
                    }
                }
                render_state.draw(&frame);
            }
            frame
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, frame: &Frame) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("current-score") {
                el.set_text_content(Some(&frame.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("high-score") {
                el.set_text_content(Some(&frame.high_score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
            if let Some(el) = document.get_element_by_id("game-over") {
                let class = if frame.game_over { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Parallax Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = Tuning::load();
        let field = Vec2::new(tuning.field_width, tuning.field_height);

        // Backing store at device resolution, field mapped onto it
        let dpr = window.device_pixel_ratio();
        let width = (field.x as f64 * dpr) as u32;
        let height = (field.y as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, Settings::load())));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, field).await;
        game.borrow_mut().render_state = Some(render_state);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        request_animation_frame(game);

        log::info!("Parallax Runner running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                // Space would scroll the page
                if g.settings.bindings.is_bound(&key) {
                    event.prevent_default();
                }
                if g.settings.bindings.toggles_fps(&key) {
                    if !event.repeat() {
                        g.settings.toggle_fps();
                    }
                    return;
                }
                g.keys.key_down(&key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyups will not arrive, release everything
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
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
        {
            let mut g = game.borrow_mut();
            g.update(time);
            let frame = g.render();
            g.update_hud(&frame);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: no images load natively, so everything uses fallback
/// geometry. A simple autopilot holds jump when a ground obstacle is close.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use parallax_runner::platform::KeyState;
    use parallax_runner::renderer::{Frame, RenderSurface};
    use parallax_runner::sim::{GameEvent, GameState, ObstacleKind, tick};
    use parallax_runner::{AssetRegistry, Settings, Tuning, highscore};

    /// Counts frames and logs the HUD once a second of game time
    struct LogSurface {
        frames: u64,
    }

    impl RenderSurface for LogSurface {
        fn draw(&mut self, frame: &Frame) {
            self.frames += 1;
            if self.frames % 60 == 0 {
                log::debug!(
                    "frame {}: score {} best {} obstacles {}",
                    self.frames,
                    frame.score,
                    frame.high_score,
                    frame.obstacles.len()
                );
            }
        }
    }

    const MAX_TICKS: u64 = 60 * 60 * 5;
    const JUMP_DISTANCE: f32 = 70.0;

    env_logger::init();
    log::info!("Parallax Runner (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the playable version");

    let tuning = Tuning::load();
    let settings = Settings::load();
    let assets = AssetRegistry::new(&tuning);
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed, tuning, highscore::load());
    let mut keys = KeyState::new();
    let mut surface = LogSurface { frames: 0 };
    let jump_key = settings.bindings.jump.first().cloned().unwrap_or_default();

    log::info!("Seed: {}", seed);

    for _ in 0..MAX_TICKS {
        let runner = state.player.rect();
        let danger = state.obstacles.iter().any(|o| {
            o.kind == ObstacleKind::Ground
                && o.pos.x > runner.pos.x
                && o.pos.x - runner.right() < JUMP_DISTANCE
        });
        if danger {
            keys.key_down(&jump_key);
        } else {
            keys.key_up(&jump_key);
        }

        tick(&mut state, &keys.snapshot(&settings.bindings), &assets);
        for event in state.drain_events() {
            if let GameEvent::NewHighScore(ticks) = event {
                highscore::save(ticks);
            }
        }
        surface.draw(&Frame::capture(&state, &assets));

        if state.is_game_over() {
            break;
        }
    }

    log::info!(
        "Headless run ended after {} frames: score {} (best {})",
        surface.frames,
        state.display_score(),
        state.display_high_score()
    );
}
