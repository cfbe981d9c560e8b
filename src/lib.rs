//! Poly Pong - N-player Pong on a polygonal arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vectors, segments, arena, paddles, ball, match)
//! - `input`: Key capture and paddle controllers
//! - `config`: Match construction parameters
//! - `renderer`: Draw contract and triangle tessellation
//! - `platform`: Browser glue (wasm32 only)

pub mod config;
pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ControlScheme, MatchConfig};
pub use error::MatchError;

use sim::Vector;

/// Game configuration constants
pub mod consts {
    /// Ball speed in canvas units per tick (constant within a rally)
    pub const BALL_SPEED: f64 = 5.0;
    /// Number of radial probes fanned around the ball for swept collision
    pub const PROBE_COUNT: usize = 8;

    /// Paddle `t` limits along its track
    pub const PADDLE_T_MIN: f64 = 0.125;
    pub const PADDLE_T_MAX: f64 = 0.875;
    /// Paddle starts centred on its track
    pub const PADDLE_T_START: f64 = 0.5;
    /// Normalized track distance moved per control tick
    pub const PADDLE_STEP: f64 = 0.01;
    /// Paddle width as a fraction of its track length
    pub const PADDLE_SIZE_RATIO: f64 = 0.25;
    /// Paddle thickness as a fraction of its width
    pub const PADDLE_HEIGHT_RATIO: f64 = 0.1;

    /// Angular margin (fraction of π) kept off the paddle tips when bouncing
    pub const BOUNCE_SLOPE: f64 = 0.0625;

    /// Debug overlay: bounce vectors sampled per paddle face, and their length
    pub const DEBUG_BOUNCE_FAN: usize = 7;
    pub const DEBUG_BOUNCE_LENGTH: f64 = 50.0;

    /// Construction defaults
    pub const DEFAULT_WIDTH: f64 = 800.0;
    pub const DEFAULT_HEIGHT: f64 = 600.0;
    pub const DEFAULT_BALL_SIZE: f64 = 10.0;
    pub const DEFAULT_PLAYERS: usize = 2;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> Vector {
    Vector::from_polar(r, theta)
}
