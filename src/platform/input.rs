//! Host key events to directional intents
//!
//! Press/release edges add and remove held keys; each intent is on while
//! any key bound to its direction is held. Auto-repeat presses are harmless,
//! and `release_all` recovers from releases the host never delivered
//! (window blur, hidden tab).

use crate::sim::InputIntent;

/// Logical direction a key is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Key name → direction table (names as reported by `KeyboardEvent.key`)
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(String, Direction)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
            .bind("ArrowLeft", Direction::Left)
            .bind("a", Direction::Left)
            .bind("A", Direction::Left)
            .bind("ArrowRight", Direction::Right)
            .bind("d", Direction::Right)
            .bind("D", Direction::Right)
    }
}

impl KeyBindings {
    /// Empty table
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind a key, replacing any existing binding for it
    pub fn bind(mut self, key: &str, direction: Direction) -> Self {
        self.bindings.retain(|(k, _)| k != key);
        self.bindings.push((key.to_string(), direction));
        self
    }

    pub fn lookup(&self, key: &str) -> Option<Direction> {
        self.bindings
            .iter()
            .find(|(k, _)| k == key)
            .map(|&(_, direction)| direction)
    }
}

/// Tracks held keys and exposes the current intent snapshot
///
/// A direction stays held while any key bound to it is down, so releasing
/// `d` while `ArrowRight` is still pressed keeps driving right.
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    bindings: KeyBindings,
    held: Vec<(String, Direction)>,
    intent: InputIntent,
}

impl InputAdapter {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: Vec::new(),
            intent: InputIntent::NONE,
        }
    }

    /// Current intent (copied, so a tick never sees a half-applied update)
    #[inline]
    pub fn intent(&self) -> InputIntent {
        self.intent
    }

    /// Handle a key press. Returns false for unbound keys so the host can pass them on.
    pub fn key_down(&mut self, key: &str) -> bool {
        let Some(direction) = self.bindings.lookup(key) else {
            return false;
        };
        // Auto-repeat delivers the same key again
        if !self.held.iter().any(|(k, _)| k == key) {
            self.held.push((key.to_string(), direction));
        }
        self.refresh();
        true
    }

    /// Handle a key release. Returns false for unbound keys.
    pub fn key_up(&mut self, key: &str) -> bool {
        if self.bindings.lookup(key).is_none() {
            return false;
        }
        self.held.retain(|(k, _)| k != key);
        self.refresh();
        true
    }

    /// Drop every held key (focus lost, tab hidden)
    pub fn release_all(&mut self) {
        if !self.held.is_empty() {
            log::debug!("Releasing {} held keys: {:?}", self.held.len(), self.intent);
        }
        self.held.clear();
        self.refresh();
    }

    fn refresh(&mut self) {
        let held = |direction| self.held.iter().any(|&(_, d)| d == direction);
        self.intent = InputIntent {
            left: held(Direction::Left),
            right: held(Direction::Right),
        };
    }
}
