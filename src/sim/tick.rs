//! Per-frame input application
//!
//! Platform code collects everything that happened since the last frame
//! into a [`TickInput`] and hands it to [`tick`], so the match only ever
//! sees input from inside the frame callback.

use super::state::Match;
use crate::input::KeySnapshot;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keys held at the start of the frame
    pub keys: KeySnapshot,
    /// Play/pause toggle (click)
    pub toggle_play: bool,
    /// New canvas extent, if the window changed size
    pub resize: Option<(f64, f64)>,
}

/// Apply frame input, then advance the match by one tick
pub fn tick(game: &mut Match, input: &TickInput) {
    if let Some((width, height)) = input.resize {
        if let Err(e) = game.resize(width, height) {
            log::warn!("Ignoring resize: {}", e);
        }
    }

    if input.toggle_play {
        game.toggle();
    }

    game.update(&input.keys);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;

    fn new_match(seed: u64) -> Match {
        Match::new(MatchConfig {
            seed,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_tick_toggle_starts_and_stops() {
        let mut game = new_match(12345);
        tick(&mut game, &TickInput::default());
        assert!(!game.is_playing());
        assert_eq!(game.ticks(), 0);

        let toggle = TickInput {
            toggle_play: true,
            ..Default::default()
        };
        tick(&mut game, &toggle);
        assert!(game.is_playing());
        assert_eq!(game.ticks(), 1);

        tick(&mut game, &toggle);
        assert!(!game.is_playing());
        assert_eq!(game.ticks(), 1);
    }

    #[test]
    fn test_tick_bad_resize_is_ignored() {
        let mut game = new_match(1);
        let input = TickInput {
            resize: Some((-1.0, 600.0)),
            ..Default::default()
        };
        tick(&mut game, &input);
        assert_eq!(game.arena().width(), 800.0);

        let input = TickInput {
            resize: Some((1024.0, 768.0)),
            ..Default::default()
        };
        tick(&mut game, &input);
        assert_eq!(game.arena().width(), 1024.0);
        assert!((game.arena().radius() - 384.0).abs() < 1e-9);
    }

    #[test]
    fn test_determinism() {
        let mut game1 = new_match(99999);
        let mut game2 = new_match(99999);

        let inputs = [
            TickInput {
                toggle_play: true,
                ..Default::default()
            },
            TickInput {
                keys: ["ArrowLeft"].into_iter().collect(),
                ..Default::default()
            },
            TickInput {
                keys: ["ArrowRight"].into_iter().collect(),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..100 {
            for input in &inputs {
                tick(&mut game1, input);
                tick(&mut game2, input);
            }
        }

        assert_eq!(game1.ticks(), game2.ticks());
        assert_eq!(game1.ball().position(), game2.ball().position());
        assert_eq!(game1.misses(), game2.misses());
        assert_eq!(game1.paddles()[0].t(), game2.paddles()[0].t());
    }
}
