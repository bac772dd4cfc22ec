//! Input tracking for the four logical game inputs.
//!
//! Every accepted key transition is appended to a queue that the frame
//! loop drains once per frame with `drain_events()`. Order is preserved, so
//! a press of one key followed by the release of another within a single
//! frame is replayed in the order it happened. Gameplay commands depend on
//! that order (a release only stops motion that the released key started).
//! The held set only filters OS key repeat and stray releases.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Key),
    Released(Key),
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    events: Vec<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// OS key repeat arrives as repeated presses; only the first one is queued.
    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.events.push(InputEvent::Pressed(key));
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.events.push(InputEvent::Released(key));
        }
    }

    /// Take every queued event in arrival order, leaving the queue empty.
    pub fn drain_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}
