//! Save Mars entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use save_mars::App;
    use save_mars::Settings;
    use save_mars::audio::WebAudio;
    use save_mars::highscores::LocalStorageStore;
    use save_mars::platform::to_viewport;
    use save_mars::renderer::RenderState;
    use save_mars::sim::state::Hud;

    /// Game instance holding all state
    struct Game {
        app: App<LocalStorageStore, WebAudio>,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        /// Last values written to the DOM
        last_hud: Option<Hud>,
    }

    impl Game {
        /// Canvas-space position of a client-space point
        fn canvas_point(&self, client_x: f64, client_y: f64) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            to_viewport(
                Vec2::new(client_x as f32, client_y as f32),
                Vec2::new(rect.left() as f32, rect.top() as f32),
            )
        }

        /// Match the canvas backing store to the window and device pixel ratio
        fn fit_canvas(&mut self) -> (f32, f32) {
            let (w, h, dpr) = window_size();
            self.canvas.set_width((w * dpr).floor() as u32);
            self.canvas.set_height((h * dpr).floor() as u32);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(self.canvas.width(), self.canvas.height(), dpr);
            }
            (w, h)
        }

        fn measure_planet(&mut self) {
            let height = document()
                .and_then(|d| d.get_element_by_id("planetWrap"))
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                .map(|el| el.offset_height() as f32);
            self.app.set_planet_height(height);
        }

        /// Render the current frame
        fn render(&mut self, frame: &save_mars::sim::Frame) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(frame) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let scale = render_state.scale_factor;
                        render_state.resize(w, h, scale);
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
            let hud = self.app.hud();
            if self.last_hud == Some(hud) {
                return;
            }
            let Some(document) = document() else { return };

            let fields = [
                ("score", hud.score.to_string()),
                ("cleared", hud.cleared.to_string()),
                ("misses", hud.misses.to_string()),
                ("best", hud.best.to_string()),
            ];
            for (id, text) in fields {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(&text));
                }
            }
            if let Some(el) = document.get_element_by_id("planetWrap") {
                let _ = el.set_attribute("data-boost", hud.boost.as_str());
            }
            self.last_hud = Some(hud);
        }

        fn update_mute_button(&self) {
            if let Some(btn) = document().and_then(|d| d.get_element_by_id("muteBtn")) {
                let label = if self.app.is_muted() { "🔇" } else { "🔊" };
                btn.set_text_content(Some(label));
            }
        }
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window().and_then(|w| w.document())
    }

    /// Window size in CSS pixels and the device pixel ratio (at least 1)
    fn window_size() -> (f32, f32, f32) {
        let Some(window) = web_sys::window() else {
            return (1.0, 1.0, 1.0);
        };
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).floor() as f32
        };
        let w = dim(window.inner_width());
        let h = dim(window.inner_height());
        let dpr = window.device_pixel_ratio().max(1.0) as f32;
        (w, h, dpr)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Save Mars starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("spaceCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let circle_segments = settings.quality.circle_segments();
        let (w, h, dpr) = window_size();
        let audio = WebAudio::new(settings.volume, settings.muted);
        let app = App::new(settings, w, h, LocalStorageStore, audio);

        let game = Rc::new(RefCell::new(Game {
            app,
            render_state: None,
            canvas: canvas.clone(),
            last_hud: None,
        }));
        {
            let mut g = game.borrow_mut();
            g.fit_canvas();
            g.measure_planet();
            g.update_mute_button();
        }

        // Initialize WebGPU
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

        match RenderState::new(
            surface,
            &adapter,
            canvas.width(),
            canvas.height(),
            dpr,
            circle_segments,
        )
        .await
        {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_resize(game.clone());

        request_animation_frame(game);

        log::info!("Save Mars running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.app.unlock_audio();
                let point = g.canvas_point(event.client_x() as f64, event.client_y() as f64);
                g.app.on_click(point);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: every active touch is tested
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.app.unlock_audio();
                let touches = event.touches();
                let points: Vec<Vec2> = (0..touches.length())
                    .filter_map(|i| touches.get(i))
                    .map(|t| g.canvas_point(t.client_x() as f64, t.client_y() as f64))
                    .collect();
                g.app.on_touch(&points);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.app.unlock_audio();
                if g.app.on_key(&event.code()) || g.app.on_key(&event.key()) {
                    event.prevent_default();
                    g.update_mute_button();
                }
            });
            if let Some(document) = document() {
                let _ = document
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Planet boost
        if let Some(planet) = document().and_then(|d| d.get_element_by_id("planetWrap")) {
            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let mut g = game.borrow_mut();
                    g.app.unlock_audio();
                    g.app.on_planet_activate();
                });
                let _ = planet
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.app.unlock_audio();
                    g.app.on_planet_activate();
                });
                let _ = planet.add_event_listener_with_callback(
                    "touchstart",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else { return };

        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.app.unlock_audio();
                g.app.on_restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("muteBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.app.unlock_audio();
                let muted = g.app.toggle_mute();
                g.update_mute_button();
                log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            let (w, h) = g.fit_canvas();
            g.app.on_resize(w, h);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let (w, h, _) = window_size();
            if g.app.poll_resize(time, w, h) {
                g.fit_canvas();
            }
            g.measure_planet();

            let frame = g.app.frame(time);
            g.render(&frame);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use save_mars::audio::SilentAudio;
    use save_mars::highscores::MemoryStore;
    use save_mars::renderer::tessellate;
    use save_mars::{App, Settings};

    env_logger::init();
    log::info!("Save Mars (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let settings = Settings {
        seed: Some(42),
        ..Settings::load()
    };
    let segments = settings.quality.circle_segments();
    let mut app = App::new(settings, 1280.0, 720.0, MemoryStore::default(), SilentAudio::new());

    // Ten seconds at 60 Hz, clicking the lowest on-screen asteroid twice a second
    let mut vertices = 0;
    for i in 0..600u32 {
        if i % 30 == 0 {
            let target = app
                .state()
                .populations
                .asteroids
                .iter()
                .filter(|a| a.pos.y > 0.0)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|a| a.pos);
            if let Some(pos) = target {
                app.on_click(pos);
            }
        }
        if i == 120 {
            app.on_planet_activate();
        }
        let frame = app.frame(i as f64 * 1000.0 / 60.0);
        vertices = tessellate(&frame, segments).len();
    }

    let hud = app.hud();
    println!(
        "score {} | cleared {} | misses {} | best {} | explosions heard {} | last frame {} vertices",
        hud.score,
        hud.cleared,
        hud.misses,
        hud.best,
        app.audio().played,
        vertices
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
