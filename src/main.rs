//! Icon Dodge entry point
//!
//! On web: wires the page's container, icons, buttons and keyboard to the
//! frame scheduler. On native: plays one headless session and logs the score.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, HtmlImageElement, KeyboardEvent, MouseEvent};

    use icon_dodge::scheduler::GameOverReport;
    use icon_dodge::view::{self, ElementStyle};
    use icon_dodge::{FrameOutcome, FrameScheduler, FrameToken, Rect, Settings};

    /// Game instance holding all state
    struct Game {
        scheduler: FrameScheduler,
        document: Document,
    }

    type SharedGame = Rc<RefCell<Game>>;

    impl Game {
        fn container(&self) -> Option<Element> {
            self.document.query_selector(".game-container").ok().flatten()
        }

        /// Container bounds in page coordinates
        fn container_rect(&self) -> Option<Rect> {
            let window = web_sys::window()?;
            let rect = self.container()?.get_bounding_client_rect();
            let left = rect.left() + window.scroll_x().unwrap_or(0.0);
            let top = rect.top() + window.scroll_y().unwrap_or(0.0);
            Some(Rect::container_at(left as f32, top as f32))
        }

        fn seed(&self) -> u64 {
            self.scheduler.next_seed(js_sys::Date::now() as u64)
        }

        /// Push the current session onto the page
        fn render(&self) {
            let Some(session) = self.scheduler.session() else {
                return;
            };
            let scene = view::project(session);

            if let Some(icon) = self.document.query_selector(".game-icon").ok().flatten() {
                if let Ok(icon) = icon.dyn_into::<HtmlImageElement>() {
                    let src = view::skin_src(&icon.src(), scene.player_skin);
                    if src != icon.src() {
                        icon.set_src(&src);
                    }
                    apply_style(&icon, &scene.player, true);
                }
            }

            for (kind, style) in &scene.enemies {
                if let Some(el) = self.document.get_element_by_id(kind.as_str()) {
                    if let Ok(el) = el.dyn_into::<HtmlElement>() {
                        apply_style(&el, style, false);
                    }
                }
            }

            if let Some(el) = self.document.get_element_by_id("time") {
                el.set_inner_html(&scene.elapsed);
            }
            if let Some(el) = self.document.get_element_by_id("level") {
                el.set_inner_html(&scene.level);
            }
        }
    }

    fn apply_style(el: &HtmlElement, style: &ElementStyle, with_size: bool) {
        let css = el.style();
        let _ = css.set_property("left", &style.left_px());
        let _ = css.set_property("top", &style.top_px());
        if with_size {
            let _ = css.set_property("width", &style.width_px());
            let _ = css.set_property("height", &style.height_px());
        } else {
            let _ = css.set_property("display", style.display());
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let raw_settings = document
            .query_selector(".game-container")
            .ok()
            .flatten()
            .and_then(|c| c.get_attribute("data-settings"));
        // The log level comes from the settings, so any parse error is
        // reported only once the logger is up
        let (settings, error) = Settings::from_json_opt(raw_settings.as_deref());

        let level = settings.log_filter().to_level().unwrap_or(log::Level::Info);
        console_log::init_with_level(level).expect("Failed to init logger");
        if let Some(e) = error {
            log::warn!("{e}; using default settings");
        }

        log::info!("Icon Dodge ready");

        let game = Rc::new(RefCell::new(Game {
            scheduler: FrameScheduler::new(settings),
            document,
        }));

        setup_buttons(game.clone());
        setup_movement_keys(game.clone());
        if game.borrow().scheduler.settings().keyboard_shortcuts {
            setup_shortcuts(game);
        }
    }

    /// Reset, spawn and start the loop
    fn initialize_game(game: &SharedGame) {
        {
            let mut g = game.borrow_mut();
            let Some(container) = g.container_rect() else {
                log::error!("No .game-container on the page");
                return;
            };
            let seed = g.seed();
            if let Some(stale) = g.scheduler.initialize(seed, container) {
                cancel_animation_frame(stale);
            }
            g.render();
        }
        request_animation_frame(game.clone());
    }

    /// Focus the container so it receives arrow keys, then begin
    fn start_game(game: &SharedGame) {
        if let Some(container) = game.borrow().container() {
            if let Ok(container) = container.dyn_into::<HtmlElement>() {
                let _ = container.focus();
            }
        }
        initialize_game(game);
    }

    fn reset_game(game: &SharedGame) {
        let mut g = game.borrow_mut();
        let Some(container) = g.container_rect() else {
            return;
        };
        let seed = g.seed();
        g.scheduler.reset(seed, container);
        g.render();
    }

    fn stop_game(game: &SharedGame) {
        if let Some(pending) = game.borrow_mut().scheduler.stop() {
            cancel_animation_frame(pending);
        }
    }

    fn request_animation_frame(game: SharedGame) {
        let window = web_sys::window().unwrap();
        let slot = Rc::new(Cell::new(0));
        let closure = {
            let game = game.clone();
            let slot = slot.clone();
            Closure::once(move |time: f64| {
                game_loop(game, FrameToken(slot.get()), time);
            })
        };
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => {
                slot.set(id);
                game.borrow_mut().scheduler.arm(FrameToken(id));
            }
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn cancel_animation_frame(token: FrameToken) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(token.0);
        }
    }

    fn game_loop(game: SharedGame, token: FrameToken, time: f64) {
        let outcome = {
            let mut g = game.borrow_mut();
            let outcome = g.scheduler.on_frame(token, time);
            if outcome != FrameOutcome::Ignored {
                g.render();
            }
            outcome
        };

        match outcome {
            FrameOutcome::Continue => request_animation_frame(game),
            FrameOutcome::GameOver(report) => show_score_later(report),
            FrameOutcome::Ignored => {}
        }
    }

    /// Fire-and-forget; a reset before it fires does not cancel it
    fn show_score_later(report: GameOverReport) {
        let window = web_sys::window().unwrap();
        let delay = report.prompt_delay_ms as i32;
        let closure = Closure::once(move || {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&view::score_prompt(&report));
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay,
        );
        closure.forget();
    }

    fn on_click(document: &Document, selector: &str, action: impl Fn() + 'static) {
        let Some(el) = document.query_selector(selector).ok().flatten() else {
            log::warn!("No {} on the page", selector);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| action());
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: SharedGame) {
        let document = game.borrow().document.clone();

        // Clicking the player icon starts a session
        {
            let game = game.clone();
            on_click(&document, ".game-icon", move || initialize_game(&game));
        }
        {
            let game = game.clone();
            on_click(&document, "#start-game", move || start_game(&game));
        }
        {
            let game = game.clone();
            on_click(&document, "#reset-game", move || reset_game(&game));
        }
        on_click(&document, "#stop-game", move || stop_game(&game));
    }

    /// Arrow keys on the focused container
    fn setup_movement_keys(game: SharedGame) {
        let Some(container) = game.borrow().container() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().scheduler.press(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = container
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if game.borrow_mut().scheduler.release(&event.key()) {
                event.prevent_default();
            }
        });
        let _ =
            container.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// `s` starts, `r` resets
    fn setup_shortcuts(game: SharedGame) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            match event.key().as_str() {
                "s" => start_game(&game),
                "r" => reset_game(&game),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Icon Dodge (native) starting...");
    log::info!("Native mode runs a headless session - serve the wasm build for the playable game");

    let settings =
        icon_dodge::Settings::from_json_or_default(std::env::var("ICON_DODGE_SETTINGS").ok().as_deref());
    headless::play(settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use icon_dodge::view;
    use icon_dodge::{FrameOutcome, FrameScheduler, FrameToken, Rect, Settings};

    /// 60 Hz frames
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after five minutes of game time
    const MAX_FRAMES: i32 = 60 * 60 * 5;

    /// Let the enemies roam around an idle player until one hits
    pub fn play(settings: Settings) {
        let seed = settings.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        let mut scheduler = FrameScheduler::new(settings);
        scheduler.initialize(seed, Rect::container_at(0.0, 0.0));

        for frame in 0..MAX_FRAMES {
            let token = FrameToken(frame);
            scheduler.arm(token);
            match scheduler.on_frame(token, frame as f64 * FRAME_MS) {
                FrameOutcome::Continue => {}
                FrameOutcome::GameOver(report) => {
                    log::info!(
                        "Hit by {} - {}",
                        report.killer.as_str(),
                        view::score_line(&report)
                    );
                    match serde_json::to_string(&report) {
                        Ok(json) => println!("{json}"),
                        Err(e) => log::error!("Could not encode report: {e}"),
                    }
                    return;
                }
                FrameOutcome::Ignored => break,
            }
        }
        log::info!("Survived {} frames untouched", MAX_FRAMES);
    }
}
