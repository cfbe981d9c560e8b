//! Polygonal arena geometry
//!
//! For `K` paddles the arena is a regular `2K`-gon inscribed in a circle of
//! radius `min(width, height) / 2` around the canvas centre (the origin).
//! Edges alternate: even edges are paddle tracks, odd edges are solid walls.
//!
//! ```text
//!        c1 ---- c0          edge 0 (c0 -> c1) is track 0, stored reversed
//!       /          \         edge 1 (c1 -> c2) is a wall
//!     c2            c5       ...
//!       \          /
//!        c3 ---- c4
//! ```

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use super::segment::Segment;
use super::vector::Vector;
use crate::error::{MatchError, check_extent};
use crate::polar_to_cartesian;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    width: f64,
    height: f64,
    paddle_count: usize,
    /// Polygon corners in angular order
    corners: Vec<Vector>,
    /// Every polygon edge, `corners[i] -> corners[i + 1]`
    edges: Vec<Segment>,
    /// Odd edges: what the ball bounces off
    boundaries: Vec<Segment>,
    /// Even edges reversed, one per paddle slot
    tracks: Vec<Segment>,
}

impl Arena {
    pub fn new(paddle_count: usize, width: f64, height: f64) -> Result<Self, MatchError> {
        if paddle_count == 0 {
            return Err(MatchError::NoPlayers);
        }
        check_extent(width, height)?;

        let mut arena = Self {
            width,
            height,
            paddle_count,
            corners: Vec::new(),
            edges: Vec::new(),
            boundaries: Vec::new(),
            tracks: Vec::new(),
        };
        arena.build();
        Ok(arena)
    }

    /// Rebuild every corner, wall and track for a new canvas extent
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), MatchError> {
        check_extent(width, height)?;
        self.width = width;
        self.height = height;
        self.build();
        Ok(())
    }

    fn build(&mut self) {
        let side_count = self.paddle_count * 2;
        let radius = self.radius();
        let step = TAU / side_count as f64;

        // First edge straddles "up"
        self.corners = (0..side_count)
            .map(|i| polar_to_cartesian(radius, i as f64 * step + FRAC_PI_2 - step / 2.0))
            .collect();

        self.edges = (0..side_count)
            .map(|i| Segment::new(self.corners[i], self.corners[(i + 1) % side_count]))
            .collect();

        self.boundaries.clear();
        self.tracks.clear();
        for (i, edge) in self.edges.iter().enumerate() {
            if i % 2 == 0 {
                // Walls wind one way, a track runs the other so that t = 0 is
                // always the player's left.
                self.tracks.push(edge.reversed());
            } else {
                self.boundaries.push(*edge);
            }
        }

        log::debug!(
            "Arena rebuilt: {} sides, radius {:.1} ({}x{})",
            side_count,
            radius,
            self.width,
            self.height
        );
    }

    /// Circumradius of the polygon
    #[inline]
    pub fn radius(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }

    /// Arena centre in center-origin canvas space
    #[inline]
    pub fn center(&self) -> Vector {
        Vector::ZERO
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn paddle_count(&self) -> usize {
        self.paddle_count
    }

    pub fn corners(&self) -> &[Vector] {
        &self.corners
    }

    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }

    pub fn boundaries(&self) -> &[Segment] {
        &self.boundaries
    }

    pub fn tracks(&self) -> &[Segment] {
        &self.tracks
    }

    /// Track for one paddle slot
    pub fn track(&self, slot: usize) -> Option<&Segment> {
        self.tracks.get(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_two_player_arena_is_a_square() {
        let arena = Arena::new(2, 800.0, 600.0).unwrap();
        assert_eq!(arena.corners().len(), 4);
        assert_eq!(arena.edges().len(), 4);
        assert_eq!(arena.tracks().len(), 2);
        assert_eq!(arena.boundaries().len(), 2);
        assert_eq!(arena.radius(), 300.0);

        // Track 0 is the edge straddling +y, running from -x to +x
        let track = arena.track(0).unwrap();
        let a = 300.0 / 2f64.sqrt();
        assert!((track.start.x + a).abs() < 1e-9);
        assert!((track.start.y - a).abs() < 1e-9);
        assert!((track.end.x - a).abs() < 1e-9);
        assert!((track.end.y - a).abs() < 1e-9);
    }

    #[test]
    fn test_tracks_are_reversed_even_edges() {
        let arena = Arena::new(3, 500.0, 500.0).unwrap();
        for (slot, track) in arena.tracks().iter().enumerate() {
            let edge = arena.edges()[slot * 2];
            assert_eq!(track.start, edge.end);
            assert_eq!(track.end, edge.start);
        }
        for (i, wall) in arena.boundaries().iter().enumerate() {
            assert_eq!(*wall, arena.edges()[i * 2 + 1]);
        }
    }

    #[test]
    fn test_edges_connect_consecutive_corners() {
        let arena = Arena::new(4, 640.0, 480.0).unwrap();
        let n = arena.corners().len();
        for (i, edge) in arena.edges().iter().enumerate() {
            assert_eq!(edge.start, arena.corners()[i]);
            assert_eq!(edge.end, arena.corners()[(i + 1) % n]);
        }
    }

    #[test]
    fn test_single_player_degenerates_to_two_sides() {
        let arena = Arena::new(1, 400.0, 400.0).unwrap();
        assert_eq!(arena.corners().len(), 2);
        assert_eq!(arena.tracks().len(), 1);
        assert_eq!(arena.boundaries().len(), 1);
        let track = arena.track(0).unwrap();
        assert!((track.length() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_degenerate_input() {
        assert_eq!(Arena::new(0, 800.0, 600.0).unwrap_err(), MatchError::NoPlayers);
        assert!(matches!(
            Arena::new(2, 0.0, 600.0),
            Err(MatchError::DegenerateCanvas { .. })
        ));
    }

    #[test]
    fn test_resize_rebuilds_geometry() {
        let mut arena = Arena::new(2, 800.0, 600.0).unwrap();
        arena.resize(200.0, 1000.0).unwrap();
        assert_eq!(arena.radius(), 100.0);
        for corner in arena.corners() {
            assert!((corner.length() - 100.0).abs() < 1e-9);
        }
        assert!(arena.resize(0.0, 10.0).is_err());
        assert_eq!(arena.radius(), 100.0);
    }

    proptest! {
        #[test]
        fn corners_sit_on_the_circumcircle(k in 1usize..12, w in 10.0f64..2000.0, h in 10.0f64..2000.0) {
            let arena = Arena::new(k, w, h).unwrap();
            let r = w.min(h) / 2.0;
            prop_assert_eq!(arena.corners().len(), 2 * k);
            prop_assert_eq!(arena.edges().len(), 2 * k);
            prop_assert_eq!(arena.tracks().len(), k);
            prop_assert_eq!(arena.boundaries().len(), k);
            for corner in arena.corners() {
                prop_assert!((corner.length() - r).abs() < 1e-9 * r.max(1.0));
            }
        }
    }
}
