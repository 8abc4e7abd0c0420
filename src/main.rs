//! Gridbreak entry point
//!
//! Handles platform-specific initialization and runs the game loop: a
//! canvas-2d driver on the web, and a headless logged autoplay demo on
//! native (the sim itself is platform-free).

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use gridbreak::highscores::LocalStorageScoreStore;
    use gridbreak::render::{self, FrameSnapshot};
    use gridbreak::sim::{Difficulty, GameEvent, GamePhase, GameState, TickInput, tick};
    use gridbreak::{ScoreStore, Tuning};

    /// Held keys plus pending one-shot events, flipped by the key handlers
    /// and snapshotted into a `TickInput` once per frame.
    #[derive(Default)]
    struct InputState {
        left: bool,
        right: bool,
        ball_boost: bool,
        paddle_boost: bool,
        difficulty: Option<Difficulty>,
        testing_mode: bool,
        restart: bool,
    }

    impl InputState {
        /// Build the tick snapshot, consuming the one-shot events
        fn take_snapshot(&mut self) -> TickInput {
            TickInput {
                left: self.left,
                right: self.right,
                ball_boost: self.ball_boost,
                paddle_boost: self.paddle_boost,
                difficulty: self.difficulty.take(),
                testing_mode: std::mem::take(&mut self.testing_mode),
                restart: std::mem::take(&mut self.restart),
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        store: LocalStorageScoreStore,
        input: InputState,
        /// Whether an animation frame is currently scheduled
        scheduled: bool,
    }

    impl Game {
        fn new(tuning: Tuning, seed: u64) -> Result<Self, JsValue> {
            let store = LocalStorageScoreStore;
            let best = store.load();
            let state = GameState::new(tuning, seed, best)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(Self {
                state,
                store,
                input: InputState::default(),
                scheduled: false,
            })
        }

        /// One frame: tick, persist any high-score crossing, report whether
        /// further frames should be scheduled.
        fn frame(&mut self) -> bool {
            let input = self.input.take_snapshot();
            for event in tick(&mut self.state, &input) {
                if let GameEvent::HighScore(best) = event {
                    self.store.save(best);
                }
            }
            !self.state.phase.is_terminal()
        }
    }

    fn canvas_context() -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no #gameCanvas element")?
            .dyn_into()?;

        // Fill the window, leaving room for the border like the page expects
        let inner_w = window.inner_width()?.as_f64().unwrap_or(904.0);
        let inner_h = window.inner_height()?.as_f64().unwrap_or(604.0);
        canvas.set_width((inner_w - 4.0) as u32);
        canvas.set_height((inner_h - 4.0) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;
        Ok((canvas, ctx))
    }

    fn draw(ctx: &CanvasRenderingContext2d, snap: &FrameSnapshot) {
        let w = snap.surface_width as f64;
        let h = snap.surface_height as f64;
        ctx.clear_rect(0.0, 0.0, w, h);

        // Bricks, with lighter/darker edge strips for depth
        for brick in &snap.bricks {
            let r = &brick.rect;
            ctx.set_fill_style_str(&render::css(brick.color));
            ctx.fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
            ctx.set_fill_style_str(&render::css(brick.color.with_lightness_delta(20.0)));
            ctx.fill_rect(r.x as f64, r.y as f64, r.w as f64, 3.0);
            ctx.set_fill_style_str(&render::css(brick.color.with_lightness_delta(-20.0)));
            ctx.fill_rect(r.x as f64, (r.bottom() - 3.0) as f64, r.w as f64, 3.0);
        }

        // Ball
        ctx.begin_path();
        let _ = ctx.arc(
            snap.ball_pos.x as f64,
            snap.ball_pos.y as f64,
            snap.ball_radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.set_fill_style_str("green");
        ctx.fill();

        // Paddle with the same edge shading
        let p = &snap.paddle_rect;
        ctx.set_fill_style_str(&render::css(snap.paddle_color));
        ctx.fill_rect(p.x as f64, p.y as f64, p.w as f64, p.h as f64);
        ctx.set_fill_style_str(&render::css(snap.paddle_color.with_lightness_delta(20.0)));
        ctx.fill_rect(p.x as f64, p.y as f64, p.w as f64, 3.0);
        ctx.set_fill_style_str(&render::css(snap.paddle_color.with_lightness_delta(-20.0)));
        ctx.fill_rect(p.x as f64, (p.bottom() - 3.0) as f64, p.w as f64, 3.0);

        // HUD
        ctx.set_font("20px Arial");
        ctx.set_fill_style_str("white");
        ctx.set_text_align("right");
        let _ = ctx.fill_text(&format!("Score: {}", snap.score), w - 10.0, 20.0);
        let _ = ctx.fill_text(&format!("Max Score: {}", snap.max_score), w - 10.0, 40.0);

        ctx.set_font("15px Arial");
        ctx.set_text_align("left");
        let _ = ctx.fill_text(
            "(<-) LEFT | (->) RIGHT | (T) TESTING MODE | (SPACEBAR) BALL SPEED | (SHIFT) PADDLE SPEED | (B, N, M) DIFFICULTY | (R) RESTART",
            20.0,
            20.0,
        );

        if snap.testing_mode {
            ctx.set_font("30px Arial");
            ctx.set_text_align("right");
            let _ = ctx.fill_text("Testing mode activated", w - 10.0, h - 10.0);
        }

        if snap.phase.is_terminal() {
            ctx.set_font("50px Arial");
            ctx.set_text_align("center");
            let message = match snap.phase {
                GamePhase::Won => "YOU WIN!",
                _ => "GAME OVER",
            };
            let _ = ctx.fill_text(message, w / 2.0, h / 2.0);
            ctx.set_font("20px Arial");
            let _ = ctx.fill_text("Press R to restart", w / 2.0, h / 2.0 + 40.0);
        }
    }

    type RafClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

    fn request_frame(raf: &RafClosure) {
        let window = web_sys::window().expect("no window");
        window
            .request_animation_frame(raf.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            .expect("requestAnimationFrame failed");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>, raf: RafClosure) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let raf = raf.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "Left" => g.input.left = true,
                    "ArrowRight" | "Right" => g.input.right = true,
                    " " => g.input.ball_boost = true,
                    "Shift" => g.input.paddle_boost = true,
                    "t" | "T" => g.input.testing_mode = true,
                    "b" | "B" => g.input.difficulty = Some(Difficulty::Easy),
                    "n" | "N" => g.input.difficulty = Some(Difficulty::Normal),
                    "m" | "M" => g.input.difficulty = Some(Difficulty::Hard),
                    "r" | "R" => {
                        g.input.restart = true;
                        // Resume scheduling if the loop halted on a
                        // terminal condition
                        if !g.scheduled {
                            g.scheduled = true;
                            drop(g);
                            request_frame(&raf);
                        }
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
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "Left" => g.input.left = false,
                    "ArrowRight" | "Right" => g.input.right = false,
                    " " => g.input.ball_boost = false,
                    "Shift" => g.input.paddle_boost = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let (canvas, ctx) = canvas_context()?;
        let tuning = Tuning {
            surface_width: canvas.width() as f32,
            surface_height: canvas.height() as f32,
            ..Tuning::default()
        };
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(tuning, seed)?));
        log::info!("gridbreak started (seed {seed})");

        let raf: RafClosure = Rc::new(RefCell::new(None));
        setup_keyboard(game.clone(), raf.clone());

        let raf_inner = raf.clone();
        let frame_game = game.clone();
        *raf.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let mut g = frame_game.borrow_mut();
            let keep_running = g.frame();
            draw(&ctx, &render::snapshot(&g.state));
            g.scheduled = keep_running;
            drop(g);
            if keep_running {
                request_frame(&raf_inner);
            }
        }) as Box<dyn FnMut()>));

        game.borrow_mut().scheduled = true;
        request_frame(&raf);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        web_sys::console::error_1(&e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gridbreak::sim::{GameEvent, GameState, TickInput, tick};
    use gridbreak::{MemoryScoreStore, ScoreStore, Tuning};

    env_logger::init();
    log::info!("gridbreak (native) starting headless demo...");

    let mut store = MemoryScoreStore::default();
    let mut state = GameState::new(Tuning::default(), 0xC0FFEE, store.load())
        .expect("default tuning is valid");

    // Simple autoplay: chase the ball's x with the paddle
    let mut ticks = 0u64;
    while !state.phase.is_terminal() && ticks < 100_000 {
        let paddle_center = state.paddle.x + state.paddle.width / 2.0;
        let input = TickInput {
            left: state.ball.pos.x < paddle_center - state.paddle.speed,
            right: state.ball.pos.x > paddle_center + state.paddle.speed,
            ..TickInput::default()
        };
        for event in tick(&mut state, &input) {
            match event {
                GameEvent::BrickDestroyed { row, col } => {
                    log::info!("brick ({row}, {col}) destroyed, score {}", state.score);
                }
                GameEvent::HighScore(best) => store.save(best),
                _ => {}
            }
        }
        ticks += 1;
    }

    println!(
        "demo over after {} ticks: {:?}, score {}, best {}",
        state.time_ticks, state.phase, state.score, store.load()
    );
}
