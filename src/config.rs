//! Match construction parameters
//!
//! Everything needed to build a [`crate::sim::Match`]. Loadable from JSON so
//! the native demo and tests can describe a match without code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{MatchError, check_extent};
use crate::input::{Controller, PaddleAction};

/// Left/right key codes for one paddle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlScheme {
    pub left: String,
    pub right: String,
}

impl Default for ControlScheme {
    fn default() -> Self {
        Self::arrows()
    }
}

impl ControlScheme {
    pub fn arrows() -> Self {
        Self {
            left: "ArrowLeft".to_string(),
            right: "ArrowRight".to_string(),
        }
    }

    pub fn controller(&self) -> Controller {
        Controller::new()
            .bind(self.right.clone(), PaddleAction::Right)
            .bind(self.left.clone(), PaddleAction::Left)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// DOM id of the canvas element (web only)
    pub canvas_id: String,
    pub width: f64,
    pub height: f64,
    /// Nominal ball size, shrunk as more players join
    pub ball_size: f64,
    pub player_count: usize,
    /// RNG seed for serve directions
    pub seed: u64,
    /// Per-slot controls; slots without an entry use the arrow keys
    pub controls: Vec<ControlScheme>,
    /// Draw probes and bounce fans
    pub debug: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            canvas_id: "canvas".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            ball_size: DEFAULT_BALL_SIZE,
            player_count: DEFAULT_PLAYERS,
            seed: 0,
            controls: Vec::new(),
            debug: false,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.player_count == 0 {
            return Err(MatchError::NoPlayers);
        }
        check_extent(self.width, self.height)?;
        if !(self.ball_size.is_finite() && self.ball_size > 0.0) {
            return Err(MatchError::InvalidBallSize(self.ball_size));
        }
        Ok(())
    }

    /// Ball radius actually used: more players, smaller ball
    pub fn ball_radius(&self) -> f64 {
        self.ball_size / (self.player_count as f64 * 0.5)
    }

    pub fn controller_for(&self, slot: usize) -> Controller {
        self.controls
            .get(slot)
            .map(ControlScheme::controller)
            .unwrap_or_else(Controller::arrows)
    }

    pub fn from_json(json: &str) -> Result<Self, MatchError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, MatchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a JSON config file, falling back to defaults if it is unusable
    pub fn load(path: &Path) -> Self {
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| MatchError::Config(e.to_string()))
            .and_then(|json| Self::from_json(&json));

        match parsed {
            Ok(config) => {
                log::info!("Loaded match config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Using default match config ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}
