//! Hill Drive entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use hill_drive::renderer::{DrawCommand, SKY_COLOR};
    use hill_drive::{Game, Tuning};

    /// Browser-side wrapper: the game plus frame timing
    struct Host {
        game: Game,
        ctx: CanvasRenderingContext2d,
        last_time: Option<f64>,
    }

    impl Host {
        /// Advance by the time since the previous animation frame and redraw
        fn frame(&mut self, time_ms: f64) {
            let elapsed = match self.last_time {
                Some(last) => ((time_ms - last) / 1000.0) as f32,
                None => 0.0,
            };
            self.last_time = Some(time_ms);

            self.game.frame(elapsed);
            self.draw();
        }

        fn draw(&self) {
            let ctx = &self.ctx;
            for command in self.game.scene() {
                match command {
                    DrawCommand::Clear { width, height } => {
                        ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
                        ctx.set_fill_style_str(SKY_COLOR);
                        ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
                    }
                    DrawCommand::FillPolygon { points, color } => {
                        let mut iter = points.iter();
                        let Some(first) = iter.next() else { continue };
                        ctx.set_fill_style_str(color);
                        ctx.begin_path();
                        ctx.move_to(first.x as f64, first.y as f64);
                        for p in iter {
                            ctx.line_to(p.x as f64, p.y as f64);
                        }
                        ctx.close_path();
                        ctx.fill();
                    }
                    DrawCommand::FillRect { center, size, color } => {
                        ctx.set_fill_style_str(color);
                        ctx.fill_rect(
                            (center.x - size.x / 2.0) as f64,
                            (center.y - size.y / 2.0) as f64,
                            size.x as f64,
                            size.y as f64,
                        );
                    }
                }
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Hill Drive starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let tuning = Tuning::default();
        canvas.set_width(tuning.surface.width as u32);
        canvas.set_height(tuning.surface.height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(tuning, Some(seed)).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let host = Rc::new(RefCell::new(Host {
            game,
            ctx,
            last_time: None,
        }));

        setup_input_handlers(&window, host.clone())?;
        setup_focus_handlers(&window, &document, host.clone())?;
        setup_stop_on_pagehide(&window, &host)?;

        start_animation_loop(host)?;

        log::info!("Hill Drive running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if host.borrow_mut().game.key_down(&event.key()) {
                    // Arrow keys would otherwise scroll the page
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if host.borrow_mut().game.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_focus_handlers(
        window: &web_sys::Window,
        document: &web_sys::Document,
        host: Rc<RefCell<Host>>,
    ) -> Result<(), JsValue> {
        // Visibility change (tab switch, minimize)
        {
            let host = host.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    host.borrow_mut().game.focus_lost();
                    log::info!("Intents released (tab hidden)");
                }
            });
            document.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut h = host.borrow_mut();
                h.game.focus_lost();
                // Resume timing from the next frame instead of replaying the gap
                h.last_time = None;
                log::info!("Intents released (window blur)");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_stop_on_pagehide(window: &web_sys::Window, host: &Rc<RefCell<Host>>) -> Result<(), JsValue> {
        let stop = host.borrow().game.stop_handle();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            stop.stop();
        });
        window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn start_animation_loop(host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let callback_clone = callback.clone();

        *callback_clone.borrow_mut() = Some(Closure::new(move |time: f64| {
            {
                let mut h = host.borrow_mut();
                if !h.game.is_running() {
                    // Not rescheduling ends the loop
                    log::info!("Game stopped after {} ticks", h.game.state().time_ticks);
                    return;
                }
                h.frame(time);
            }
            if let Some(cb) = callback.borrow().as_ref() {
                request_animation_frame(cb);
            }
        }));

        if let Some(cb) = callback_clone.borrow().as_ref() {
            request_animation_frame(cb);
        }
        Ok(())
    }

    fn request_animation_frame(cb: &Closure<dyn FnMut(f64)>) {
        let requested = web_sys::window()
            .map(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()));
        if !matches!(requested, Some(Ok(_))) {
            log::error!("requestAnimationFrame failed");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hill_drive::consts::TICK_SECONDS;
    use hill_drive::{Game, Tuning};

    env_logger::init();
    log::info!("Hill Drive (native) starting...");
    log::info!("Native mode runs a headless drive - build for wasm32 to play in a browser");

    let seed = std::env::var("HILL_DRIVE_SEED")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok());
    let mut game = match Game::new(Tuning::default(), seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            std::process::exit(1);
        }
    };

    // Three seconds of throttle, then coast for one
    game.key_down("ArrowRight");
    for _ in 0..180 {
        game.frame(TICK_SECONDS);
    }
    game.key_up("ArrowRight");
    for _ in 0..60 {
        game.frame(TICK_SECONDS);
    }
    game.stop_handle().stop();

    let state = game.state();
    log::info!(
        "Drive finished: seed={}, ticks={}, pos=({:.1}, {:.1}), vel=({:.2}, {:.2})",
        state.seed(),
        state.time_ticks,
        state.vehicle.pos.x,
        state.vehicle.pos.y,
        state.vehicle.vel.x,
        state.vehicle.vel.y
    );
    println!(
        "✓ Drove {} ticks on seed {}, ended at x={:.1}",
        state.time_ticks,
        state.seed(),
        state.vehicle.pos.x
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
