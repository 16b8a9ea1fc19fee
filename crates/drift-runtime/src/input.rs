//! Input events, held-key state and key bindings

use crate::command::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// A discrete event delivered by the platform's event queue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// The window was closed or the platform asked the program to exit
    Quit,
    KeyDown(KeyCode),
    KeyUp(KeyCode),
}

/// Keys bound to each movement direction and to quitting
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBindings {
    pub up: Vec<KeyCode>,
    pub down: Vec<KeyCode>,
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            up: vec![KeyCode::ArrowUp],
            down: vec![KeyCode::ArrowDown],
            left: vec![KeyCode::ArrowLeft],
            right: vec![KeyCode::ArrowRight],
            quit: vec![KeyCode::Escape],
        }
    }
}

impl InputBindings {
    /// Keys bound to a movement direction
    pub fn keys_for(&self, direction: Direction) -> &[KeyCode] {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    pub fn is_quit_key(&self, key: KeyCode) -> bool {
        self.quit.contains(&key)
    }
}

/// Tracks which keys are held, sampled once per frame
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    bindings: InputBindings,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::with_bindings(InputBindings::default())
    }

    pub fn with_bindings(bindings: InputBindings) -> Self {
        Self {
            keys_down: HashSet::new(),
            bindings,
        }
    }

    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Apply a platform event. Returns true when the event asks the loop to quit.
    pub fn process_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Quit => true,
            InputEvent::KeyDown(key) => {
                self.process_key_down(key);
                self.bindings.is_quit_key(key)
            }
            InputEvent::KeyUp(key) => {
                self.process_key_up(key);
                false
            }
        }
    }

    /// Is a key currently held down?
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Is any key bound to `direction` held?
    pub fn is_direction_held(&self, direction: Direction) -> bool {
        self.bindings
            .keys_for(direction)
            .iter()
            .any(|k| self.keys_down.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_transitions() {
        let mut input = InputState::new();

        input.process_key_down(KeyCode::ArrowUp);
        assert!(input.is_key_down(KeyCode::ArrowUp));

        // A repeated press keeps the key held
        input.process_key_down(KeyCode::ArrowUp);
        assert!(input.is_key_down(KeyCode::ArrowUp));

        input.process_key_up(KeyCode::ArrowUp);
        assert!(!input.is_key_down(KeyCode::ArrowUp));

        // Releasing a key that was never held is harmless
        input.process_key_up(KeyCode::ArrowLeft);
        assert!(!input.is_direction_held(Direction::Left));
    }

    #[test]
    fn test_default_direction_bindings() {
        let mut input = InputState::new();
        assert!(!input.is_direction_held(Direction::Left));

        input.process_key_down(KeyCode::ArrowLeft);
        assert!(input.is_direction_held(Direction::Left));
        assert!(!input.is_direction_held(Direction::Right));
    }

    #[test]
    fn test_custom_bindings() {
        let bindings = InputBindings {
            up: vec![KeyCode::KeyW, KeyCode::ArrowUp],
            ..InputBindings::default()
        };
        let mut input = InputState::with_bindings(bindings);

        input.process_key_down(KeyCode::KeyW);
        assert!(input.is_direction_held(Direction::Up));

        input.process_key_up(KeyCode::KeyW);
        input.process_key_down(KeyCode::ArrowUp);
        assert!(input.is_direction_held(Direction::Up));
    }

    #[test]
    fn test_quit_events() {
        let mut input = InputState::new();
        assert!(input.process_event(InputEvent::Quit));
        assert!(input.process_event(InputEvent::KeyDown(KeyCode::Escape)));
        assert!(!input.process_event(InputEvent::KeyDown(KeyCode::ArrowDown)));
        assert!(!input.process_event(InputEvent::KeyUp(KeyCode::Escape)));
        assert!(input.is_key_down(KeyCode::ArrowDown));
    }

    #[test]
    fn test_bindings_from_toml() {
        let bindings: InputBindings = toml::from_str(
            r#"
            up = ["KeyW"]
            quit = ["KeyQ", "Escape"]
            "#,
        )
        .unwrap();
        assert_eq!(bindings.up, vec![KeyCode::KeyW]);
        assert_eq!(bindings.down, vec![KeyCode::ArrowDown]);
        assert!(bindings.is_quit_key(KeyCode::KeyQ));
    }
}
