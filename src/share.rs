//! Progress sharing
//!
//! Builds the brag line and hands it to whatever the platform offers:
//! the native share sheet when `navigator.share` exists, otherwise the
//! clipboard with a brief confirmation. A user backing out of the share
//! sheet is a deliberate choice, not an error - nothing changes and
//! nothing is surfaced.

use crate::progress::SessionState;

/// Title handed to the native share sheet
pub const GAME_TITLE: &str = "Math Quest";

/// How a share attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Native share sheet completed
    Shared,
    /// Fallback: text landed on the clipboard
    Copied,
    /// The player dismissed the native sheet
    Cancelled,
    /// Neither share nor clipboard worked
    Unavailable,
}

/// Human-readable progress summary
pub fn progress_summary(state: &SessionState) -> String {
    format!(
        "I reached level {} in Math Quest with a score of {}! Can you beat me?",
        state.unlocked_level, state.score
    )
}

/// Share the current progress (WASM only). Read-only: the session state
/// is never touched, whatever the outcome.
#[cfg(target_arch = "wasm32")]
pub async fn share_progress(state: SessionState) -> ShareOutcome {
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;

    let Some(window) = web_sys::window() else {
        return ShareOutcome::Unavailable;
    };
    let text = progress_summary(&state);
    let url = window.location().href().unwrap_or_default();
    let navigator = window.navigator();

    let has_native_share =
        js_sys::Reflect::has(navigator.as_ref(), &JsValue::from_str("share")).unwrap_or(false);

    let outcome = if has_native_share {
        let data = web_sys::ShareData::new();
        data.set_title(GAME_TITLE);
        data.set_text(&text);
        data.set_url(&url);
        match JsFuture::from(navigator.share_with_data(&data)).await {
            Ok(_) => ShareOutcome::Shared,
            Err(_) => {
                log::info!("Share sheet dismissed");
                ShareOutcome::Cancelled
            }
        }
    } else {
        let clipboard = navigator.clipboard();
        match JsFuture::from(clipboard.write_text(&format!("{} {}", text, url))).await {
            Ok(_) => {
                let _ = window
                    .alert_with_message("Copied to clipboard! Share it with your friends.");
                ShareOutcome::Copied
            }
            Err(_) => {
                log::warn!("Clipboard write failed");
                ShareOutcome::Unavailable
            }
        }
    };

    log::info!("Share finished: {:?}", outcome);
    outcome
}
