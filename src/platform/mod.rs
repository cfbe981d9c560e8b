//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events feeding [`crate::input::KeyState`]
//! - Canvas sizing and the 2D drawing context
//! - The display-refresh loop

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::renderer::Canvas;
use crate::sim::Vector;

/// Center-origin point to top-left device pixels
pub fn to_device(canvas: &impl Canvas, p: Vector) -> (f64, f64) {
    (p.x + canvas.width() * 0.5, p.y + canvas.height() * 0.5)
}
