//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use qrframe::services::fonts::FontRegistry;
use qrframe::state::app_state::AppState;

/// DejaVu Sans, distributed under the Bitstream Vera license (see
/// `fonts/LICENSE`).
pub fn dejavu_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/DejaVuSans.ttf")
}

pub fn dejavu_bytes() -> Vec<u8> {
    fs::read(dejavu_path()).expect("font fixture is present")
}

/// Registry whose fallback face is DejaVu Sans.
pub fn registry_with_fallback() -> FontRegistry {
    let mut registry = FontRegistry::new();
    registry.set_fallback(dejavu_bytes()).expect("font fixture parses");
    registry
}

/// Fresh session that draws captions with DejaVu Sans.
pub fn session_with_fallback() -> AppState {
    let mut session = AppState::new();
    session
        .load_fallback_font(&dejavu_path())
        .expect("font fixture loads");
    session
}
