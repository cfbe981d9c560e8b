//! Construction-time errors
//!
//! Nothing in the per-tick path fails: degenerate inputs are turned away
//! before an arena or match exists.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum MatchError {
    /// A match needs at least one paddle slot
    NoPlayers,
    /// Canvas extent is zero, negative or not finite
    DegenerateCanvas { width: f64, height: f64 },
    /// Ball size is zero, negative or not finite
    InvalidBallSize(f64),
    /// Config text could not be parsed
    Config(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::NoPlayers => write!(f, "player count must be at least 1"),
            MatchError::DegenerateCanvas { width, height } => {
                write!(f, "canvas extent must be positive and finite, got {}x{}", width, height)
            }
            MatchError::InvalidBallSize(size) => {
                write!(f, "ball size must be positive and finite, got {}", size)
            }
            MatchError::Config(reason) => write!(f, "invalid match config: {}", reason),
        }
    }
}

impl std::error::Error for MatchError {}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        MatchError::Config(err.to_string())
    }
}

/// Reject canvas extents that would collapse the arena
pub fn check_extent(width: f64, height: f64) -> Result<(), MatchError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(MatchError::DegenerateCanvas { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_extent() {
        assert!(check_extent(800.0, 600.0).is_ok());
        assert_eq!(
            check_extent(0.0, 600.0),
            Err(MatchError::DegenerateCanvas { width: 0.0, height: 600.0 })
        );
        assert!(check_extent(800.0, f64::NAN).is_err());
        assert!(check_extent(-1.0, 5.0).is_err());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(MatchError::NoPlayers.to_string(), "player count must be at least 1");
        assert!(MatchError::InvalidBallSize(-2.0).to_string().contains("-2"));
    }
}
