//! Seven-day weather forecast TUI
//!
//! Event (keyboard) -> root UI / component -> Action -> reducer -> Effect ->
//! forecast task -> result Action -> reducer -> render. After each render the
//! forecast component compares its coordinate prop with the last one it saw
//! and asks for a new forecast when it moved.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod state;
pub mod ui;
