//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (walls, then paddles by slot)
//! - No platform dependencies; drawing goes through [`crate::renderer::Canvas`]

pub mod arena;
pub mod ball;
pub mod paddle;
pub mod segment;
pub mod state;
pub mod tick;
pub mod vector;

pub use arena::Arena;
pub use ball::{Ball, Contact, PlayField};
pub use paddle::{BoundingEdges, Paddle};
pub use segment::{Intersection, Segment};
pub use state::{GameEvent, Match, MatchPhase};
pub use tick::{TickInput, tick};
pub use vector::Vector;
