//! Drift Core - Foundational types for the Drift sprite sandbox
//!
//! This crate provides the types every other Drift crate depends on:
//! - `Vec2`, `Size`, `Rect` - Screen-space geometry
//! - `Color`, `TextureId` - Rendering handles
//! - `DriftError`, `ErrorCode` - Error types and Result alias

mod error;
mod types;

pub use error::{DriftError, ErrorCode, Result};
pub use types::{Color, Rect, Size, TextureId, Vec2};
