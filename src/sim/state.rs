//! Match state and orchestration
//!
//! A [`Match`] owns the arena, one paddle per track and the ball. The host
//! calls [`Match::frame`] once per display refresh: one update, then one draw.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::ball::{Ball, Contact, PlayField};
use super::paddle::Paddle;
use crate::config::MatchConfig;
use crate::consts::{DEBUG_BOUNCE_FAN, DEBUG_BOUNCE_LENGTH};
use crate::error::MatchError;
use crate::input::KeySnapshot;
use crate::renderer::{Canvas, colors};

/// Whether ticks advance the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    Playing,
    /// Frozen on the last committed state
    Paused,
}

/// Things that happened during one update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BoundaryBounce { index: usize },
    /// `offset` is where along the face the ball struck, 0..=1
    PaddleBounce { paddle: usize, offset: f64 },
    /// Rally over; `None` when the ball left without crossing a track
    Missed { paddle: Option<usize> },
}

impl From<&Contact> for GameEvent {
    fn from(contact: &Contact) -> Self {
        match *contact {
            Contact::Boundary { index, .. } => GameEvent::BoundaryBounce { index },
            Contact::Paddle { index, hit } => GameEvent::PaddleBounce {
                paddle: index,
                offset: hit.u,
            },
            Contact::Track { index, .. } => GameEvent::Missed {
                paddle: Some(index),
            },
            Contact::Escaped => GameEvent::Missed { paddle: None },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Match {
    config: MatchConfig,
    arena: Arena,
    paddles: Vec<Paddle>,
    ball: Ball,
    phase: MatchPhase,
    rng: Pcg32,
    /// Rallies lost per paddle slot
    misses: Vec<u32>,
    /// Updates run while playing
    ticks: u64,
    /// Events from the most recent update
    events: Vec<GameEvent>,
}

impl Match {
    /// Build a paused match. Rejects configs that would produce NaN geometry.
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;

        let arena = Arena::new(config.player_count, config.width, config.height)?;
        let paddles: Vec<Paddle> = arena
            .tracks()
            .iter()
            .enumerate()
            .map(|(slot, track)| Paddle::new(*track, config.controller_for(slot)))
            .collect();

        let mut rng = Pcg32::seed_from_u64(config.seed);
        let ball = Ball::new(config.ball_radius(), &mut rng);

        log::info!(
            "New match: {} players on {}x{}, ball radius {:.2}, seed {}",
            config.player_count,
            config.width,
            config.height,
            ball.radius(),
            config.seed
        );

        Ok(Self {
            misses: vec![0; paddles.len()],
            config,
            arena,
            paddles,
            ball,
            phase: MatchPhase::Paused,
            rng,
            ticks: 0,
            events: Vec::new(),
        })
    }

    /// Advance one tick: move the ball, then let every paddle read the keys
    pub fn update(&mut self, keys: &KeySnapshot) {
        self.events.clear();
        if self.phase != MatchPhase::Playing {
            return;
        }
        self.ticks += 1;

        let field = PlayField {
            boundaries: self.arena.boundaries(),
            paddles: &self.paddles,
            center: self.arena.center(),
            radius: self.arena.radius(),
        };
        if let Some(contact) = self.ball.update(&field, &mut self.rng) {
            let event = GameEvent::from(&contact);
            if let GameEvent::Missed { paddle } = event {
                if let Some(count) = paddle.and_then(|slot| self.misses.get_mut(slot)) {
                    *count += 1;
                }
                log::info!("Rally lost by {:?} after {} ticks", paddle, self.ticks);
                self.pause();
            }
            self.events.push(event);
        }

        for paddle in &mut self.paddles {
            paddle.update(keys);
        }
    }

    /// One display refresh: update then draw
    pub fn frame<C: Canvas>(&mut self, keys: &KeySnapshot, canvas: &mut C) {
        self.update(keys);
        self.draw(canvas);
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        canvas.clear(colors::BACKGROUND);

        for boundary in self.arena.boundaries() {
            canvas.line(boundary.start, boundary.end, colors::BOUNDARY);
        }
        for paddle in &self.paddles {
            let track = paddle.track();
            canvas.line(track.start, track.end, colors::TRACK);
            canvas.polygon(paddle.corners(), colors::PADDLE);
        }
        canvas.circle(self.ball.position(), self.ball.radius(), colors::BALL);

        if self.config.debug {
            self.draw_debug(canvas);
        }
    }

    fn draw_debug<C: Canvas>(&self, canvas: &mut C) {
        let position = self.ball.position();
        for probe in self.ball.diagonals() {
            canvas.line(probe.start, probe.end, colors::PROBE);
        }
        let heading = position + self.ball.velocity() * self.ball.radius();
        canvas.line(position, heading, colors::HEADING);

        for paddle in &self.paddles {
            canvas.outline(paddle.corners(), colors::PROBE);
            for ray in paddle.bounce_fan(DEBUG_BOUNCE_FAN, DEBUG_BOUNCE_LENGTH) {
                canvas.line(ray.start, ray.end, colors::BOUNCE);
                canvas.circle(ray.start, 2.0, colors::BOUNCE_SOURCE);
            }
        }
    }

    pub fn play(&mut self) {
        if self.phase != MatchPhase::Playing {
            log::debug!("Match resumed");
        }
        self.phase = MatchPhase::Playing;
    }

    pub fn pause(&mut self) {
        if self.phase != MatchPhase::Paused {
            log::debug!("Match paused");
        }
        self.phase = MatchPhase::Paused;
    }

    pub fn toggle(&mut self) {
        match self.phase {
            MatchPhase::Playing => self.pause(),
            MatchPhase::Paused => self.play(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == MatchPhase::Playing
    }

    /// Rebuild the arena for a new canvas size. Paddles keep their `t`; the
    /// ball keeps its position and heading.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), MatchError> {
        self.arena.resize(width, height)?;
        for (paddle, track) in self.paddles.iter_mut().zip(self.arena.tracks()) {
            paddle.resize(*track);
        }
        self.config.width = width;
        self.config.height = height;
        log::info!("Match resized to {}x{}", width, height);
        Ok(())
    }

    pub fn debug(&self) -> bool {
        self.config.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.config.debug = debug;
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn paddles(&self) -> &[Paddle] {
        &self.paddles
    }

    pub fn paddles_mut(&mut self) -> &mut [Paddle] {
        &mut self.paddles
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Replace the ball, e.g. to stage a specific shot
    pub fn set_ball(&mut self, ball: Ball) {
        self.ball = ball;
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn misses(&self) -> &[u32] {
        &self.misses
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexCanvas;
    use crate::sim::Vector;

    fn square_match() -> Match {
        Match::new(MatchConfig {
            width: 400.0,
            height: 400.0,
            seed: 7,
            ..Default::default()
        })
        .unwrap()
    }

    /// Records which primitives were drawn
    #[derive(Default)]
    struct CountingCanvas {
        clears: usize,
        lines: usize,
        circles: usize,
        polygons: usize,
    }

    impl Canvas for CountingCanvas {
        fn width(&self) -> f64 {
            400.0
        }
        fn height(&self) -> f64 {
            400.0
        }
        fn clear(&mut self, _color: [f32; 4]) {
            self.clears += 1;
        }
        fn line(&mut self, _from: Vector, _to: Vector, _color: [f32; 4]) {
            self.lines += 1;
        }
        fn circle(&mut self, _center: Vector, _radius: f64, _color: [f32; 4]) {
            self.circles += 1;
        }
        fn polygon(&mut self, _points: &[Vector], _color: [f32; 4]) {
            self.polygons += 1;
        }
    }

    #[test]
    fn test_new_match_starts_paused() {
        let game = square_match();
        assert_eq!(game.phase(), MatchPhase::Paused);
        assert_eq!(game.paddles().len(), 2);
        assert_eq!(game.misses(), &[0, 0]);
        assert_eq!(game.ball().position(), Vector::ZERO);
        assert!((game.ball().radius() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = Match::new(MatchConfig {
            player_count: 0,
            ..Default::default()
        });
        assert!(matches!(result, Err(MatchError::NoPlayers)));

        let result = Match::new(MatchConfig {
            width: f64::NAN,
            ..Default::default()
        });
        assert!(matches!(result, Err(MatchError::DegenerateCanvas { .. })));
    }

    #[test]
    fn test_paused_update_is_a_no_op() {
        let mut game = square_match();
        let before = game.ball().position();
        let keys: KeySnapshot = ["ArrowRight"].into_iter().collect();
        game.update(&keys);
        assert_eq!(game.ball().position(), before);
        assert_eq!(game.paddles()[0].t(), 0.5);
        assert_eq!(game.ticks(), 0);
    }

    #[test]
    fn test_toggle() {
        let mut game = square_match();
        game.toggle();
        assert!(game.is_playing());
        game.toggle();
        assert!(!game.is_playing());
        game.play();
        game.play();
        assert!(game.is_playing());
    }

    #[test]
    fn test_playing_moves_ball_and_paddles() {
        let mut game = square_match();
        game.play();
        let keys: KeySnapshot = ["ArrowRight"].into_iter().collect();
        game.update(&keys);
        assert!((game.ball().position().length() - 5.0).abs() < 1e-9);
        for paddle in game.paddles() {
            assert!((paddle.t() - 0.51).abs() < 1e-12);
        }
        assert_eq!(game.ticks(), 1);
    }

    #[test]
    fn test_wall_bounce_reports_event() {
        let mut game = square_match();
        // Odd edge 1 of the square is a vertical wall at x = -a
        let wall = game.arena().boundaries()[0];
        let target = wall.center();
        let start = target * 0.9;
        game.set_ball(Ball::at(start, target - start, game.ball().radius()));
        game.play();

        for _ in 0..100 {
            game.update(&KeySnapshot::default());
            if !game.events().is_empty() {
                break;
            }
        }
        assert_eq!(game.events(), &[GameEvent::BoundaryBounce { index: 0 }]);
        assert!(game.is_playing());
        assert!(game.ball().direction().dot(target) < 0.0);
    }

    #[test]
    fn test_track_miss_scores_and_pauses() {
        let mut game = square_match();
        // Aim at track 0 well away from the centered paddle
        let track = *game.paddles()[0].track();
        let target = track.lerp(0.05);
        let start = target * 0.8;
        game.set_ball(Ball::at(start, target - start, game.ball().radius()));
        game.play();

        for _ in 0..200 {
            game.update(&KeySnapshot::default());
            if !game.is_playing() {
                break;
            }
        }
        assert_eq!(game.events(), &[GameEvent::Missed { paddle: Some(0) }]);
        assert_eq!(game.misses(), &[1, 0]);
        assert_eq!(game.ball().position(), Vector::ZERO);
        assert!((game.ball().speed() - 5.0).abs() < 1e-12);

        // Paused updates report nothing new
        game.update(&KeySnapshot::default());
        assert!(game.events().is_empty());
        assert_eq!(game.misses(), &[1, 0]);
    }

    #[test]
    fn test_paddle_face_bounce_reports_offset() {
        let mut game = square_match();
        let face = *game.paddles()[1].top();
        let target = face.center();
        game.set_ball(Ball::at(Vector::ZERO, target, game.ball().radius()));
        game.play();

        let mut bounced = None;
        for _ in 0..200 {
            game.update(&KeySnapshot::default());
            if let Some(&GameEvent::PaddleBounce { paddle, offset }) = game.events().first() {
                bounced = Some((paddle, offset));
                break;
            }
        }
        let (paddle, offset) = bounced.unwrap();
        assert_eq!(paddle, 1);
        assert!((offset - 0.5).abs() < 0.1);
        assert!(game.ball().direction().dot(target) < 0.0);
    }

    #[test]
    fn test_resize_keeps_paddle_t() {
        let mut game = square_match();
        game.paddles_mut()[0].set_t(0.3);
        game.resize(800.0, 800.0).unwrap();
        assert_eq!(game.paddles()[0].t(), 0.3);
        assert!((game.arena().radius() - 400.0).abs() < 1e-9);
        assert!((game.paddles()[0].track().length() - game.arena().tracks()[0].length()).abs() < 1e-9);
        assert_eq!(game.config().width, 800.0);

        assert!(game.resize(0.0, 10.0).is_err());
        assert_eq!(game.config().width, 800.0);
    }

    #[test]
    fn test_draw_contract() {
        let mut game = square_match();
        let mut canvas = CountingCanvas::default();
        game.draw(&mut canvas);
        assert_eq!(canvas.clears, 1);
        // 2 boundaries + 2 tracks
        assert_eq!(canvas.lines, 4);
        assert_eq!(canvas.polygons, 2);
        assert_eq!(canvas.circles, 1);

        game.set_debug(true);
        let mut canvas = CountingCanvas::default();
        game.draw(&mut canvas);
        // + 8 probes, heading, then per paddle a 4-sided outline and 7 fan rays
        assert_eq!(canvas.lines, 4 + 8 + 1 + 2 * (4 + 7));
        assert_eq!(canvas.circles, 1 + 14);
    }

    #[test]
    fn test_frame_updates_then_draws() {
        let mut game = square_match();
        game.play();
        let mut canvas = VertexCanvas::new(400.0, 400.0);
        game.frame(&KeySnapshot::default(), &mut canvas);
        assert_eq!(game.ticks(), 1);
        assert!(canvas.vertex_count() > 0);
    }

    #[test]
    fn test_same_seed_same_serve() {
        let a = square_match();
        let b = square_match();
        assert_eq!(a.ball().direction(), b.ball().direction());
    }
}
