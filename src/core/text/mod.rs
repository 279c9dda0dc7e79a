//! Text helpers (ANSI parsing, width calculations, control-character sanitizing).
//!
//! These helpers are pure (string in/string out) and live under `core` so widgets can depend on
//! them without importing anything from the render layer.

pub mod ansi;
pub mod sanitize;
pub mod width;
