//! Victory celebration timer
//!
//! A cancellable interval that fires confetti bursts for a fixed five
//! seconds and then shuts itself off. The actual particle rendering is
//! the page's business (a `window.confetti` hook); this module owns the
//! schedule, the decaying intensity curve, and the guarantee that no
//! timer survives a session reset.

/// Total effect duration
pub const CELEBRATION_DURATION_MS: f64 = 5_000.0;
/// Interval between bursts
pub const CELEBRATION_TICK_MS: i32 = 250;
/// Particles in the very first burst
pub const MAX_BURST_PARTICLES: f64 = 50.0;

/// Burst size at a point in the effect: full at the start, linearly down
/// to nothing at the end.
pub fn burst_intensity(elapsed_ms: f64) -> f64 {
    let remaining = (CELEBRATION_DURATION_MS - elapsed_ms).max(0.0);
    MAX_BURST_PARTICLES * (remaining / CELEBRATION_DURATION_MS)
}

#[cfg(target_arch = "wasm32")]
mod platform {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::wasm_bindgen;

    use super::{CELEBRATION_DURATION_MS, CELEBRATION_TICK_MS, burst_intensity};

    // JS binding for the confetti hook provided by the page
    #[wasm_bindgen(inline_js = "
        export function confetti_burst(particles) {
            if (window.confetti) {
                window.confetti({
                    particleCount: particles,
                    spread: 360,
                    startVelocity: 30,
                    ticks: 60,
                });
            }
        }
    ")]
    extern "C" {
        fn confetti_burst(particles: f64);
    }

    /// Handle to the (at most one) running celebration interval
    #[derive(Debug, Default)]
    pub struct Celebration {
        handle: Rc<Cell<Option<i32>>>,
    }

    impl Celebration {
        /// Start the effect, restarting the clock if one is running
        pub fn start(&mut self) {
            self.cancel();

            let Some(window) = web_sys::window() else {
                return;
            };

            let started = js_sys::Date::now();
            let handle = Rc::clone(&self.handle);
            let closure = Closure::<dyn FnMut()>::new(move || {
                let elapsed = js_sys::Date::now() - started;
                if elapsed >= CELEBRATION_DURATION_MS {
                    // Self-terminate once the run is over
                    if let (Some(window), Some(id)) = (web_sys::window(), handle.take()) {
                        window.clear_interval_with_handle(id);
                    }
                    return;
                }
                confetti_burst(burst_intensity(elapsed));
            });

            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                CELEBRATION_TICK_MS,
            ) {
                Ok(id) => {
                    self.handle.set(Some(id));
                    closure.forget();
                }
                Err(_) => log::warn!("Failed to schedule celebration timer"),
            }
        }

        /// Stop a pending effect. Called on reset so the timer can't leak
        /// into the next session.
        pub fn cancel(&mut self) {
            if let (Some(window), Some(id)) = (web_sys::window(), self.handle.take()) {
                window.clear_interval_with_handle(id);
                log::debug!("Celebration cancelled");
            }
        }

        pub fn is_active(&self) -> bool {
            self.handle.get().is_some()
        }
    }
}

/// Native stub - the celebration is a browser-only effect
#[cfg(not(target_arch = "wasm32"))]
mod platform {
    #[derive(Debug, Default)]
    pub struct Celebration;

    impl Celebration {
        pub fn start(&mut self) {
            log::info!("Victory!");
        }

        pub fn cancel(&mut self) {
            // No-op for native
        }

        pub fn is_active(&self) -> bool {
            false
        }
    }
}

pub use platform::Celebration;
