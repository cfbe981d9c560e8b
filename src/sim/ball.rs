//! Ball motion and swept collision resolution
//!
//! Each tick the ball moves by its velocity, then a set of probe segments is
//! intersected with the walls, paddle faces and paddle tracks:
//! - the motion segment from the previous to the new position
//! - eight radial probes of ball-radius length around the new centre
//!
//! A motion segment contact always wins since the centre itself crossed a
//! surface. Otherwise the radial contact with the smallest `t` (deepest
//! overlap) is resolved. Within one probe the closest surface is taken.

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::paddle::Paddle;
use super::segment::{Intersection, Segment};
use super::vector::Vector;
use crate::consts::{BALL_SPEED, PROBE_COUNT};

/// Read-only view of everything the ball can collide with
#[derive(Debug, Clone, Copy)]
pub struct PlayField<'a> {
    /// Solid walls
    pub boundaries: &'a [Segment],
    pub paddles: &'a [Paddle],
    /// Arena centre; every surface is played from the side facing it
    pub center: Vector,
    /// Circumradius; a ball centre beyond it has left the arena
    pub radius: f64,
}

/// Probe offsets at or below this count as starting on the surface
const CONTACT_EPSILON: f64 = 1e-9;

/// Which way a surface's own normal faces when the centre lies on its line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Winding {
    /// Walls wind around the centre, so their left normal faces in
    Inward,
    /// Tracks and paddle faces run the other way
    Outward,
}

/// What the ball ran into this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Mirrored off wall `index`
    Boundary { index: usize, hit: Intersection },
    /// Redirected by the face of paddle `index`; `hit.u` is the face offset
    Paddle { index: usize, hit: Intersection },
    /// Slipped past paddle `index` onto its track
    Track { index: usize, hit: Intersection },
    /// Left the arena without touching anything
    Escaped,
}

impl Contact {
    /// True when the rally ended
    pub fn is_miss(&self) -> bool {
        matches!(self, Contact::Track { .. } | Contact::Escaped)
    }

    pub fn hit(&self) -> Option<&Intersection> {
        match self {
            Contact::Boundary { hit, .. } | Contact::Paddle { hit, .. } | Contact::Track { hit, .. } => {
                Some(hit)
            }
            Contact::Escaped => None,
        }
    }

    /// Position along the probe; smaller means the probe reached further in
    fn depth(&self) -> f64 {
        self.hit().map_or(f64::INFINITY, |hit| hit.t)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    position: Vector,
    /// Unit heading
    direction: Vector,
    speed: f64,
    radius: f64,
}

impl Ball {
    /// New ball at the arena centre with a random heading
    pub fn new<R: Rng>(radius: f64, rng: &mut R) -> Self {
        let mut ball = Self::at(Vector::ZERO, Vector::new(1.0, 0.0), radius);
        ball.reset(rng);
        ball
    }

    /// Ball at `position` heading along `direction` at the standard speed
    pub fn at(position: Vector, direction: Vector, radius: f64) -> Self {
        Self {
            position,
            direction: direction.normalized(),
            speed: BALL_SPEED,
            radius,
        }
    }

    /// Back to the centre with a fresh uniformly random heading
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        let angle = rng.random_range(0.0..TAU);
        self.reset_with_angle(angle);
    }

    pub fn reset_with_angle(&mut self, angle: f64) {
        self.direction = Vector::from_polar(1.0, angle);
        self.speed = BALL_SPEED;
        self.position = Vector::ZERO;
    }

    /// Advance one tick and resolve at most one contact.
    ///
    /// A track contact or escape resets the ball; the caller decides what a
    /// miss means for the match.
    pub fn update<R: Rng>(&mut self, field: &PlayField<'_>, rng: &mut R) -> Option<Contact> {
        let previous = self.position;
        self.position += self.velocity();

        let motion = Segment::new(previous, self.position);
        let contact = self
            .first_contact(&motion, field)
            .map(|c| (motion, c))
            .or_else(|| {
                self.diagonals()
                    .into_iter()
                    .filter_map(|probe| self.first_contact(&probe, field).map(|c| (probe, c)))
                    .min_by(|a, b| a.1.depth().total_cmp(&b.1.depth()))
            });

        match contact {
            Some((probe, contact)) => {
                self.resolve(&probe, &contact, field, rng);
                Some(contact)
            }
            None if self.position.length() > field.radius => {
                log::debug!("Ball escaped at ({:.1}, {:.1})", self.position.x, self.position.y);
                self.reset(rng);
                Some(Contact::Escaped)
            }
            None => None,
        }
    }

    /// Radial probes of ball-radius length
    pub fn diagonals(&self) -> Vec<Segment> {
        let step = TAU / PROBE_COUNT as f64;
        (0..PROBE_COUNT)
            .map(|i| {
                let tip = self.position + Vector::from_polar(self.radius, i as f64 * step);
                Segment::new(self.position, tip)
            })
            .collect()
    }

    /// Closest surface the probe touches while the ball heads into it
    fn first_contact(&self, probe: &Segment, field: &PlayField<'_>) -> Option<Contact> {
        let mut best: Option<Contact> = None;
        let mut best_t = f64::INFINITY;

        let mut consider =
            |surface: &Segment, winding: Winding, make: &dyn Fn(Intersection) -> Contact| {
                if let Some(hit) = probe.intersect(surface) {
                    if hit.t > CONTACT_EPSILON
                        && hit.t < best_t
                        && self.approaches(surface, winding, field.center)
                    {
                        best_t = hit.t;
                        best = Some(make(hit));
                    }
                }
            };

        for (index, boundary) in field.boundaries.iter().enumerate() {
            consider(boundary, Winding::Inward, &|hit: Intersection| {
                Contact::Boundary { index, hit }
            });
        }
        for (index, paddle) in field.paddles.iter().enumerate() {
            consider(paddle.top(), Winding::Outward, &|hit: Intersection| {
                Contact::Paddle { index, hit }
            });
            consider(paddle.track(), Winding::Outward, &|hit: Intersection| {
                Contact::Track { index, hit }
            });
        }

        best
    }

    /// Whether the heading carries the ball into `surface` from its play side.
    ///
    /// Depends on the heading only, so a ball pulled back onto a surface and
    /// sent away from it never registers that surface again.
    fn approaches(&self, surface: &Segment, winding: Winding, center: Vector) -> bool {
        self.direction.dot(play_normal(surface, winding, center)) < 0.0
    }

    fn resolve<R: Rng>(
        &mut self,
        probe: &Segment,
        contact: &Contact,
        field: &PlayField<'_>,
        rng: &mut R,
    ) {
        match *contact {
            Contact::Boundary { index, hit } => {
                self.pull_back(probe, hit.t);
                self.direction = field.boundaries[index].reflect(self.direction);
                log::debug!("Ball bounced off wall {}", index);
            }
            Contact::Paddle { index, hit } => {
                self.pull_back(probe, hit.t);
                self.direction = field.paddles[index].bounce_vector(hit.u);
                log::debug!("Ball bounced off paddle {} at offset {:.3}", index, hit.u);
            }
            Contact::Track { index, .. } => {
                log::debug!("Ball slipped past paddle {}", index);
                self.reset(rng);
            }
            Contact::Escaped => self.reset(rng),
        }
    }

    /// Move back along the probe so its tip sits on the contact point
    fn pull_back(&mut self, probe: &Segment, t: f64) {
        self.position -= probe.delta() * (1.0 - t);
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn direction(&self) -> Vector {
        self.direction
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Always `direction * speed`
    pub fn velocity(&self) -> Vector {
        self.direction * self.speed
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Unit normal of `surface` pointing towards the play area
fn play_normal(surface: &Segment, winding: Winding, center: Vector) -> Vector {
    let normal = surface.normal();
    let side = normal.dot(center - surface.start);
    if side > CONTACT_EPSILON {
        normal
    } else if side < -CONTACT_EPSILON {
        -normal
    } else {
        // Centre on the surface's line (one-player arena)
        match winding {
            Winding::Inward => normal,
            Winding::Outward => -normal,
        }
    }
}
