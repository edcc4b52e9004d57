//! Boolean key state fed by keydown/keyup events

use std::collections::HashSet;

use crate::settings::KeyBindings;
use crate::sim::TickInput;

/// Set of currently held keys, by `KeyboardEvent.key` name
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.held.insert(key.to_string());
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    /// Release everything (window lost focus, keyups will never arrive)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    fn any_down(&self, keys: &[String]) -> bool {
        keys.iter().any(|k| self.is_down(k))
    }

    /// Snapshot the held keys as logical actions for one tick
    pub fn snapshot(&self, bindings: &KeyBindings) -> TickInput {
        TickInput {
            jump: self.any_down(&bindings.jump),
            left: self.any_down(&bindings.left),
            right: self.any_down(&bindings.right),
            restart: self.any_down(&bindings.restart),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_down_up() {
        let mut keys = KeyState::new();
        keys.key_down("a");
        assert!(keys.is_down("a"));
        keys.key_up("a");
        assert!(!keys.is_down("a"));
        // keyup without keydown is harmless
        keys.key_up("z");
        assert!(!keys.is_down("z"));
    }

    #[test]
    fn test_snapshot_uses_bindings() {
        let bindings = KeyBindings::default();
        let mut keys = KeyState::new();

        keys.key_down(" ");
        keys.key_down("d");
        let input = keys.snapshot(&bindings);
        assert!(input.jump);
        assert!(input.right);
        assert!(!input.left);
        assert!(!input.restart);

        keys.key_up(" ");
        keys.key_down("w");
        assert!(keys.snapshot(&bindings).jump);

        keys.clear();
        let input = keys.snapshot(&bindings);
        assert!(!input.jump && !input.left && !input.right && !input.restart);
    }
}
