//! Track-following paddles
//!
//! A paddle slides along its track by a normalized parameter `t` and sits
//! entirely on the play-area side of it. Everything else (position, corners,
//! bounding edges) is derived from the track and `t`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::segment::Segment;
use super::vector::Vector;
use crate::consts::*;
use crate::input::{Controller, KeySnapshot};

/// The four sides of a paddle's rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingEdges {
    /// Face towards the play area, the one the ball hits
    pub top: Segment,
    /// Face nearest the track
    pub bottom: Segment,
    pub left: Segment,
    pub right: Segment,
}

impl BoundingEdges {
    fn from_corners(corners: &[Vector; 4]) -> Self {
        let [top_left, top_right, bottom_right, bottom_left] = *corners;
        Self {
            top: Segment::new(top_left, top_right),
            bottom: Segment::new(bottom_left, bottom_right),
            left: Segment::new(bottom_left, top_left),
            right: Segment::new(top_right, bottom_right),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    track: Segment,
    /// Track angle, cached on resize
    angle: f64,
    t: f64,
    size: f64,
    width: f64,
    height: f64,
    position: Vector,
    /// Top-left, top-right, bottom-right, bottom-left
    corners: [Vector; 4],
    edges: BoundingEdges,
    controller: Controller,
}

impl Paddle {
    pub fn new(track: Segment, controller: Controller) -> Self {
        let degenerate = Segment::new(Vector::ZERO, Vector::ZERO);
        let mut paddle = Self {
            track,
            angle: 0.0,
            t: PADDLE_T_START,
            size: 0.0,
            width: 0.0,
            height: 0.0,
            position: Vector::ZERO,
            corners: [Vector::ZERO; 4],
            edges: BoundingEdges {
                top: degenerate,
                bottom: degenerate,
                left: degenerate,
                right: degenerate,
            },
            controller,
        };
        paddle.resize(track);
        paddle
    }

    /// Bind to a (possibly rebuilt) track, keeping `t`
    pub fn resize(&mut self, track: Segment) {
        self.track = track;
        self.angle = track.angle();
        self.size = track.length() * PADDLE_SIZE_RATIO;
        self.width = self.size;
        self.height = self.size * PADDLE_HEIGHT_RATIO;
        self.calculate_position();
    }

    /// Apply held-key actions, then refresh geometry
    pub fn update(&mut self, keys: &KeySnapshot) {
        let actions: Vec<_> = self.controller.control(keys).collect();
        for action in actions {
            action.apply(self);
        }
        self.calculate_position();
    }

    pub fn go_right(&mut self) {
        self.set_t(self.t + PADDLE_STEP);
    }

    pub fn go_left(&mut self) {
        self.set_t(self.t - PADDLE_STEP);
    }

    /// Set the track parameter, clamped to keep the paddle off the corners
    pub fn set_t(&mut self, t: f64) {
        self.t = t.clamp(PADDLE_T_MIN, PADDLE_T_MAX);
        self.calculate_position();
    }

    fn calculate_position(&mut self) {
        self.position = self.track.lerp(self.t);

        // Axis-aligned in the track's frame, pushed inward off the track
        let left = self.position.x - self.width * 0.5;
        let right = self.position.x + self.width * 0.5;
        let top = self.position.y - self.height * 1.5;
        let bottom = self.position.y - self.height * 0.5;

        self.corners = [
            Vector::new(left, top),
            Vector::new(right, top),
            Vector::new(right, bottom),
            Vector::new(left, bottom),
        ];
        for corner in &mut self.corners {
            corner
                .sub_mut(self.position)
                .rotate_z(self.angle)
                .add_mut(self.position);
        }

        self.edges = BoundingEdges::from_corners(&self.corners);
    }

    /// Outgoing unit direction for a hit at `offset` along the top face.
    ///
    /// The offset is squeezed into `[slope, 1 - slope]` so the tips never
    /// send the ball parallel to the face, and the angle is measured from
    /// the track so every paddle bounces away from its own player.
    pub fn bounce_vector(&self, offset: f64) -> Vector {
        let start_angle = BOUNCE_SLOPE;
        let end_angle = 1.0 - BOUNCE_SLOPE;
        let lerp_angle = start_angle + (end_angle - start_angle) * offset;
        Vector::from_polar(1.0, self.angle + PI * lerp_angle - PI)
    }

    /// Bounce directions sampled evenly along the top face, as segments of
    /// `length` starting on the face (debug overlay)
    pub fn bounce_fan(&self, count: usize, length: f64) -> Vec<Segment> {
        let steps = count.saturating_sub(1).max(1) as f64;
        (0..count)
            .map(|i| {
                let offset = i as f64 / steps;
                let source = self.edges.top.lerp(offset);
                Segment::new(source, source + self.bounce_vector(offset) * length)
            })
            .collect()
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn track(&self) -> &Segment {
        &self.track
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn corners(&self) -> &[Vector; 4] {
        &self.corners
    }

    pub fn edges(&self) -> &BoundingEdges {
        &self.edges
    }

    pub fn top(&self) -> &Segment {
        &self.edges.top
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }
}
