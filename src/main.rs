//! Math Quest entry point
//!
//! Handles platform-specific initialization and wires the browser UI to
//! the progression controller.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{Document, MouseEvent};

    use math_quest::celebration::Celebration;
    use math_quest::level::{self, OPTION_COUNT, Question};
    use math_quest::persistence;
    use math_quest::progress::{Action, Effect, MAX_LEVEL, SessionState, View, reduce};
    use math_quest::share;

    /// App instance holding all state
    struct App {
        state: SessionState,
        celebration: Celebration,
        /// Challenge for the level being played, regenerated per attempt
        question: Option<Question>,
        /// Base seed for question generation
        seed: u64,
        /// Attempt counter mixed into the seed so replays get a fresh question
        attempts: u64,
    }

    impl App {
        fn new(state: SessionState, seed: u64) -> Self {
            Self {
                state,
                celebration: Celebration::default(),
                question: None,
                seed,
                attempts: 0,
            }
        }

        /// Generate a fresh challenge for the current level
        fn serve_question(&mut self) {
            self.attempts += 1;
            self.question = Some(level::question_for_level(
                self.state.current_level,
                self.seed.wrapping_add(self.attempts),
            ));
        }
    }

    /// Run one transition: reduce, apply the effect, persist, re-render
    fn dispatch(app: &Rc<RefCell<App>>, action: Action) {
        {
            let mut a = app.borrow_mut();
            let reduced = reduce(&a.state, action);

            match reduced.effect {
                Some(Effect::Celebrate) => a.celebration.start(),
                Some(Effect::CancelCelebration) => a.celebration.cancel(),
                None => {}
            }

            if reduced.state != a.state {
                persistence::save_session(&reduced.state);
            }

            let entering_game = reduced.state.view == View::Game && a.state.view != View::Game;
            a.state = reduced.state;
            if entering_game {
                a.serve_question();
            } else if a.state.view != View::Game {
                a.question = None;
            }
        }
        render(app);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Math Quest starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let state = persistence::load_session();
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(state, seed)));

        // A restored mid-level session gets a fresh question
        if app.borrow().state.view == View::Game {
            app.borrow_mut().serve_question();
        }

        build_level_grid(&document);
        setup_nav_buttons(&document, &app);
        setup_level_grid(&document, &app);
        setup_option_buttons(&document, &app);

        render(&app);

        log::info!("Math Quest running!");
    }

    /// Attach a click handler to a button by element id
    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure =
                Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("Missing element #{}", id);
        }
    }

    fn setup_nav_buttons(document: &Document, app: &Rc<RefCell<App>>) {
        {
            let app = app.clone();
            on_click(document, "start-btn", move || {
                dispatch(&app, Action::StartGame);
            });
        }
        {
            let app = app.clone();
            on_click(document, "map-home-btn", move || {
                dispatch(&app, Action::GoHome);
            });
        }
        {
            let app = app.clone();
            on_click(document, "game-exit-btn", move || {
                dispatch(&app, Action::BackToMap);
            });
        }

        // Reset lives on both the map and the victory screen, behind the
        // same confirmation prompt
        for id in ["reset-btn", "victory-reset-btn"] {
            let app = app.clone();
            on_click(document, id, move || {
                let confirmed = web_sys::window()
                    .and_then(|w| {
                        w.confirm_with_message(
                            "Restart from the beginning? Your score will be lost.",
                        )
                        .ok()
                    })
                    .unwrap_or(false);
                dispatch(&app, Action::ResetGame { confirmed });
            });
        }

        {
            let app = app.clone();
            on_click(document, "share-btn", move || {
                let state = app.borrow().state;
                wasm_bindgen_futures::spawn_local(async move {
                    let _ = share::share_progress(state).await;
                });
            });
        }
    }

    /// Create the 100 map tiles once; render only retags their classes
    fn build_level_grid(document: &Document) {
        let Some(grid) = document.get_element_by_id("level-grid") else {
            log::warn!("Missing element #level-grid");
            return;
        };
        for level in 1..=MAX_LEVEL {
            if let Ok(tile) = document.create_element("button") {
                let _ = tile.set_attribute("id", &format!("tile-{}", level));
                let _ = tile.set_attribute("data-level", &level.to_string());
                tile.set_text_content(Some(&level.to_string()));
                let _ = grid.append_child(&tile);
            }
        }
    }

    /// One delegated listener on the grid instead of a closure per tile
    fn setup_level_grid(document: &Document, app: &Rc<RefCell<App>>) {
        let Some(grid) = document.get_element_by_id("level-grid") else {
            return;
        };
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = event.target() else { return };
            let Ok(tile) = target.dyn_into::<web_sys::Element>() else {
                return;
            };
            let Some(attr) = tile.get_attribute("data-level") else {
                return;
            };
            let Ok(level) = attr.parse::<u8>() else { return };

            if app.borrow().state.is_level_unlocked(level) {
                dispatch(&app, Action::SelectLevel(level));
            } else {
                log::debug!("Level {} is locked", level);
            }
        });
        let _ = grid.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_option_buttons(document: &Document, app: &Rc<RefCell<App>>) {
        for slot in 0..OPTION_COUNT {
            let app = app.clone();
            on_click(document, &format!("option-{}", slot), move || {
                let delta = {
                    let a = app.borrow();
                    let Some(question) = &a.question else { return };
                    let Some(choice) = question.options.get(slot) else {
                        return;
                    };
                    level::score_delta(question.check(*choice))
                };
                dispatch(&app, Action::CompleteLevel(delta));
            });
        }
    }

    /// The presentation layer is a pure function of the latest snapshot
    fn render(app: &Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let a = app.borrow();

        for view in [View::Home, View::Map, View::Game, View::Victory] {
            if let Some(el) = document.get_element_by_id(view.as_str()) {
                let class = if a.state.view == view {
                    "screen"
                } else {
                    "screen hidden"
                };
                let _ = el.set_attribute("class", class);
            }
        }

        match a.state.view {
            View::Home => render_home(&document, &a.state),
            View::Map => render_map(&document, &a.state),
            View::Game => render_game(&document, &a.state, a.question.as_ref()),
            View::Victory => render_victory(&document, &a.state),
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn render_home(document: &Document, state: &SessionState) {
        if let Some(panel) = document.get_element_by_id("home-continue") {
            let class = if state.has_progress() {
                "continue-panel"
            } else {
                "continue-panel hidden"
            };
            let _ = panel.set_attribute("class", class);
        }
        set_text(
            document,
            "home-level",
            &format!("Continue at level {}", state.unlocked_level),
        );
        set_text(document, "home-score", &format!("Score: {}", state.score));
    }

    fn render_map(document: &Document, state: &SessionState) {
        set_text(document, "map-score", &state.score.to_string());
        for level in 1..=MAX_LEVEL {
            if let Some(tile) = document.get_element_by_id(&format!("tile-{}", level)) {
                let class = if state.is_frontier(level) {
                    "tile frontier"
                } else if state.is_level_unlocked(level) {
                    "tile"
                } else {
                    "tile locked"
                };
                let _ = tile.set_attribute("class", class);
            }
        }
    }

    fn render_game(document: &Document, state: &SessionState, question: Option<&Question>) {
        set_text(
            document,
            "game-level",
            &format!("Level {}", state.current_level),
        );
        let Some(question) = question else {
            log::warn!("Game view without a question");
            return;
        };
        set_text(document, "question-text", &question.text);
        for (slot, option) in question.options.iter().enumerate() {
            set_text(document, &format!("option-{}", slot), &option.to_string());
        }
    }

    fn render_victory(document: &Document, state: &SessionState) {
        set_text(document, "victory-score", &state.score.to_string());
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Math Quest (native) starting...");
    log::info!("The interactive shell is web-only - run with `trunk serve` to play");

    // Scripted walkthrough
    demo_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_session() {
    use math_quest::level::{question_for_level, score_delta};
    use math_quest::progress::{Action, SessionState, reduce};
    use math_quest::share::progress_summary;

    let mut state = SessionState::default();
    state = reduce(&state, Action::StartGame).state;

    for attempt in 0..3u64 {
        state = reduce(&state, Action::SelectLevel(state.unlocked_level)).state;
        let question = question_for_level(state.current_level, attempt);
        println!(
            "Level {}: {} -> {}",
            state.current_level, question.text, question.answer
        );
        state = reduce(&state, Action::CompleteLevel(score_delta(true))).state;
    }

    println!("{}", progress_summary(&state));
}
