//! Session persistence
//!
//! One JSON record under a fixed LocalStorage key. Loads never fail:
//! an absent, corrupt or partial record degrades to the default session.
//! Saves are fire-and-forget; a failed write only costs the next restore.

use crate::progress::SessionState;

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &'static str = "math_quest_session";

/// Serialize a session to its stored JSON form
pub fn encode(state: &SessionState) -> Option<String> {
    match serde_json::to_string(state) {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("Failed to encode session: {}", e);
            None
        }
    }
}

/// Parse a stored record. Missing fields fill from defaults, out-of-range
/// values are clamped, garbage is rejected.
pub fn decode(json: &str) -> Option<SessionState> {
    serde_json::from_str::<SessionState>(json)
        .ok()
        .map(SessionState::sanitized)
}

/// Load the session from LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load_session() -> SessionState {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(json)) = storage.get_item(STORAGE_KEY) {
            if let Some(state) = decode(&json) {
                log::info!(
                    "Restored session: level {} unlocked, score {}",
                    state.unlocked_level,
                    state.score
                );
                return state;
            }
            log::warn!("Saved session was unreadable, starting fresh");
        }
    }

    log::info!("No saved session, using defaults");
    SessionState::default()
}

/// Save the session to LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save_session(state: &SessionState) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Some(json) = encode(state) {
            let _ = storage.set_item(STORAGE_KEY, &json);
            log::debug!("Session saved ({})", state.view.as_str());
        }
    } else {
        log::warn!("LocalStorage unavailable, session kept in memory only");
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_session() -> SessionState {
    SessionState::default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_session(_state: &SessionState) {
    // No-op for native
}
