//! Key capture and paddle controllers
//!
//! [`KeyState`] is written by input events one key at a time. Paddles never
//! read it directly: each tick the match takes a [`KeySnapshot`] and hands
//! that copy to every paddle, so the pressed set cannot change mid-iteration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::sim::Paddle;

/// Something a key can make a paddle do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleAction {
    Left,
    Right,
}

impl PaddleAction {
    pub fn apply(self, paddle: &mut Paddle) {
        match self {
            PaddleAction::Left => paddle.go_left(),
            PaddleAction::Right => paddle.go_right(),
        }
    }
}

/// One key code bound to one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// `KeyboardEvent.code` value, e.g. "ArrowLeft"
    pub code: String,
    pub action: PaddleAction,
}

/// Key bindings for a single paddle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    bindings: Vec<Binding>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::arrows()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// ArrowLeft / ArrowRight
    pub fn arrows() -> Self {
        Self::new()
            .bind("ArrowRight", PaddleAction::Right)
            .bind("ArrowLeft", PaddleAction::Left)
    }

    pub fn bind(mut self, code: impl Into<String>, action: PaddleAction) -> Self {
        self.bindings.push(Binding {
            code: code.into(),
            action,
        });
        self
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Whether `code` is bound here and currently held
    pub fn pressed_key(&self, keys: &KeySnapshot, code: &str) -> bool {
        self.bindings.iter().any(|b| b.code == code) && keys.contains(code)
    }

    /// Actions whose key is held, in binding order
    pub fn control<'a>(&'a self, keys: &'a KeySnapshot) -> impl Iterator<Item = PaddleAction> + 'a {
        self.bindings
            .iter()
            .filter(|b| keys.contains(&b.code))
            .map(|b| b.action)
    }
}

/// Currently held keys, fed by platform input events
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed: Vec<String>,
    listening: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_listening(&mut self) {
        self.listening = true;
    }

    /// Stop accepting events and forget anything held
    pub fn stop_listening(&mut self) {
        self.listening = false;
        self.pressed.clear();
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Record a key going down. Returns false if ignored or already held.
    pub fn press(&mut self, code: &str) -> bool {
        if !self.listening || self.is_pressed(code) {
            return false;
        }
        self.pressed.push(code.to_string());
        true
    }

    /// Record a key going up. Returns false if it was not held.
    pub fn release(&mut self, code: &str) -> bool {
        match self.pressed.iter().position(|c| c == code) {
            Some(index) => {
                self.pressed.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.iter().any(|c| c == code)
    }

    /// Copy of the held set for one tick
    pub fn snapshot(&self) -> KeySnapshot {
        self.pressed.iter().map(String::as_str).collect()
    }
}

/// Immutable copy of the held keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    codes: BTreeSet<String>,
}

impl KeySnapshot {
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for KeySnapshot {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().map(str::to_string).collect(),
        }
    }
}
