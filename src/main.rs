//! Sépan entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use sepan::audio::AudioManager;
    use sepan::consts::*;
    use sepan::platform::{AudioSink, FixedTimestep, forward_audio};
    use sepan::renderer::{RenderState, build_scene};
    use sepan::sim::{
        ButtonEdges, Buttons, ControllerId, GamePhase, GameState, KeyboardState, Keys, TickInput,
        Transition, autopilot_input, tick,
    };
    use sepan::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        audio: AudioManager,
        clock: FixedTimestep,
        keyboard: KeyboardState,
        buttons: ButtonEdges,
        idle_mode: bool,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Menu last written to the DOM
        hud_menu: Option<(GamePhase, usize)>,
        /// Quit was chosen; the loop is winding down
        stopped: bool,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed, Tuning::default()),
                audio: AudioManager::new(&settings),
                settings,
                render_state: None,
                clock: FixedTimestep::default(),
                keyboard: KeyboardState::default(),
                buttons: ButtonEdges::default(),
                idle_mode: false,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                hud_menu: None,
                stopped: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let steps = self.clock.advance(dt);

            if steps > 0 {
                // Edges are only collected when a tick will consume them
                let (held, pressed) = self.keyboard.take_frame();
                let controllers = self.buttons.update(&poll_gamepads());
                let mut input = TickInput {
                    held,
                    pressed,
                    controllers,
                };

                for _ in 0..steps {
                    let step_input = if self.idle_mode {
                        autopilot_input(&self.state)
                    } else {
                        input.clone()
                    };
                    tick(&mut self.state, &step_input, self.clock.step());
                    forward_audio(
                        &self.state.drain_events(),
                        self.state.music_wanted(),
                        &mut self.audio,
                    );

                    // One-shot inputs go to the first substep only
                    input.clear_edges();
                }
            }

            if self.state.quit_requested && !self.stopped {
                self.stopped = true;
                self.audio.set_music(false);
                log::info!("Quit requested, stopping game loop");
            }

            // Track frame times for FPS
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
        fn render(&mut self) {
            let vertices = build_scene(&self.state.view(), &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let view = self.state.view();

            set_text(&document, "#hud-score .hud-value", &view.score.to_string());
            set_text(&document, "#hud-hits .hud-value", &view.hits_left.to_string());
            set_text(&document, "#hud-fps .hud-value", &self.fps.to_string());
            set_visible(&document, "hud", view.shows_playfield());
            set_visible(&document, "hud-fps", self.settings.show_fps);
            set_visible(&document, "idle-badge", self.idle_mode);

            // Menu overlay
            set_visible(&document, "menu", view.menu.is_some() && !self.stopped);
            let shown = view.menu.map(|m| (view.phase, m.selected));
            if let Some(menu) = view.menu {
                if shown != self.hud_menu {
                    set_text(&document, "#menu-title", menu.title);
                    let items: String = menu
                        .options
                        .iter()
                        .enumerate()
                        .map(|(i, option)| {
                            let class = if i == menu.selected { "selected" } else { "" };
                            format!("<li class=\"{class}\">{}</li>", option.label())
                        })
                        .collect();
                    if let Some(list) = document.get_element_by_id("menu-options") {
                        list.set_inner_html(&items);
                    }
                }
            }
            self.hud_menu = shown;

            // Final stats
            let game_over = view.phase == GamePhase::GameOver;
            set_visible(&document, "game-over-stats", game_over);
            if game_over {
                set_text(&document, "#final-score", &view.score.to_string());
                let best = view
                    .best_score
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".into());
                set_text(&document, "#best-score", &best);
            }

            set_visible(&document, "quit-message", self.stopped);
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Held buttons on every connected standard-mapping gamepad
    fn poll_gamepads() -> Vec<(ControllerId, Buttons)> {
        let Some(window) = web_sys::window() else {
            return Vec::new();
        };
        let Ok(pads) = window.navigator().get_gamepads() else {
            return Vec::new();
        };

        pads.iter()
            .filter_map(|pad| pad.dyn_into::<web_sys::Gamepad>().ok())
            .filter(|pad| pad.connected())
            .map(|pad| {
                let mut held = Buttons::empty();
                for (index, button) in pad.buttons().iter().enumerate() {
                    let Ok(button) = button.dyn_into::<web_sys::GamepadButton>() else {
                        continue;
                    };
                    if button.pressed() {
                        if let Some(mapped) = Buttons::from_standard_index(index as u32) {
                            held |= mapped;
                        }
                    }
                }
                (ControllerId(pad.index()), held)
            })
            .collect()
    }

    fn show_fatal(document: &Document, message: &str) {
        log::error!("{message}");
        set_visible(document, "loading", false);
        if let Some(el) = document.get_element_by_id("fatal-error") {
            el.set_text_content(Some(message));
            let _ = el.set_attribute("class", "");
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sépan starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => return show_fatal(&document, &format!("Failed to create surface: {e}")),
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => return show_fatal(&document, &format!("No graphics adapter: {e}")),
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => return show_fatal(&document, &format!("Failed to create device: {e}")),
        }

        set_visible(&document, "loading", false);

        setup_input_handlers(game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Sépan running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                // First user gesture unlocks audio
                g.audio.resume();

                let key = event.key();
                if key == "i" || key == "I" {
                    if !event.repeat() {
                        g.idle_mode = !g.idle_mode;
                        log::info!("Idle mode: {}", g.idle_mode);
                    }
                    return;
                }
                if let Some(mapped) = Keys::from_dom_key(&key) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                    g.keyboard.key_down(mapped, event.repeat());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(mapped) = Keys::from_dom_key(&event.key()) {
                    game.borrow_mut().keyboard.key_up(mapped);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let stopped = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
            g.stopped
        };

        if !stopped {
            request_animation_frame(game);
        }
    }

    /// Pause when the page goes away and drop any keys held at the time
    fn lose_focus(g: &mut Game, reason: &str) {
        g.keyboard.release_all();
        g.clock.reset();
        if g.state.phase == GamePhase::Playing && g.state.transition(Transition::Pause) {
            log::info!("Auto-paused ({reason})");
        }
        if g.settings.mute_on_blur {
            g.audio.set_muted(true);
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    lose_focus(&mut g, "tab hidden");
                } else {
                    g.audio.set_muted(false);
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                lose_focus(&mut game.borrow_mut(), "window blur");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window focus
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod native_demo {
    use std::time::{SystemTime, UNIX_EPOCH};

    use sepan::consts::SIM_DT;
    use sepan::platform::{HeadlessSink, RenderSink, forward_audio};
    use sepan::renderer::build_scene;
    use sepan::sim::{GameEvent, GameState, autopilot_input, tick};
    use sepan::{ConfigError, Settings, Tuning};

    /// Demo length when `SEPAN_DEMO_SECONDS` is unset
    const DEFAULT_DEMO_SECONDS: f32 = 30.0;

    fn demo_seconds() -> f32 {
        match std::env::var("SEPAN_DEMO_SECONDS") {
            Ok(raw) => match raw.parse::<f32>() {
                Ok(secs) if secs > 0.0 => secs,
                _ => {
                    log::warn!("Ignoring SEPAN_DEMO_SECONDS={raw:?}");
                    DEFAULT_DEMO_SECONDS
                }
            },
            Err(_) => DEFAULT_DEMO_SECONDS,
        }
    }

    /// Run the simulation headless with the autopilot at the controls
    pub fn run() -> Result<(), ConfigError> {
        let tuning = match std::env::args_os().nth(1) {
            Some(path) => Tuning::load_file(path)?,
            None => Tuning::default(),
        };
        let settings = Settings::load();

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        let ticks = (demo_seconds() / SIM_DT).ceil() as u64;
        log::info!("Headless demo: seed {seed}, {ticks} ticks");

        let mut state = GameState::new(seed, tuning);
        let mut sink = HeadlessSink::default();
        let mut games = 0u32;
        let mut total_hits = 0u32;
        let mut peak_vertices = 0usize;

        for _ in 0..ticks {
            let input = autopilot_input(&state);
            tick(&mut state, &input, SIM_DT);

            let view = state.view();
            peak_vertices = peak_vertices.max(build_scene(&view, &settings).len());
            sink.present(&view);

            let events = state.drain_events();
            for event in &events {
                match event {
                    GameEvent::GameOver { .. } => games += 1,
                    GameEvent::Hit { .. } => total_hits += 1,
                    _ => {}
                }
            }
            forward_audio(&events, state.music_wanted(), &mut sink);
        }

        log::info!(
            "Demo finished: {} frames, {} games over, {} hits taken, best score {:?}, \
             current score {}, peak {} enemies / {} vertices, {} sounds",
            sink.frames,
            games,
            total_hits,
            state.best_score,
            state.run.score,
            sink.peak_enemies,
            peak_vertices,
            sink.sounds.len()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sépan (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - use `trunk serve` to play");

    if let Err(e) = native_demo::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
