//! Drift Player: windowed player library
//!
//! This crate provides the `WinitPlatform` backend and the command-line
//! arguments for running the Drift frame loop in a real window.

mod cli;
mod platform;

pub use cli::{write_error_lines, Args, DEFAULT_CONFIG_FILE};
pub use platform::WinitPlatform;
