//! Movement commands and held-key dispatch
//!
//! Every move displaces the player by its speed on one axis and by half its
//! speed on the perpendicular axis (the "slide"):
//!
//! | Direction | dx     | dy       |
//! |-----------|--------|----------|
//! | Up        | -speed | -speed/2 |
//! | Down      | +speed | +speed/2 |
//! | Left      | -speed | +speed/2 |
//! | Right     | +speed | -speed/2 |

use crate::input::InputState;
use crate::scene::Player;
use drift_core::Vec2;
use serde::{Deserialize, Serialize};

/// The four fixed movement intents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Dispatch order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Displacement of one move at `speed`, slide included
    pub fn displacement(self, speed: f32) -> Vec2 {
        let slide = speed / 2.0;
        match self {
            Direction::Up => Vec2::new(-speed, -slide),
            Direction::Down => Vec2::new(speed, slide),
            Direction::Left => Vec2::new(-speed, slide),
            Direction::Right => Vec2::new(speed, -slide),
        }
    }
}

/// A single movement intent, applied synchronously
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveCommand {
    direction: Direction,
}

impl MoveCommand {
    pub const fn new(direction: Direction) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn execute(&self, player: &mut Player) {
        player.position += self.direction.displacement(player.speed);
    }
}

/// Maps held keys to movement commands
pub struct CommandHandler {
    commands: [MoveCommand; 4],
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHandler {
    pub fn new() -> Self {
        Self {
            commands: Direction::ALL.map(MoveCommand::new),
        }
    }

    pub fn command(&self, direction: Direction) -> &MoveCommand {
        // ALL and `commands` share an order
        &self.commands[direction as usize]
    }

    /// Execute the command of every direction whose key is held.
    ///
    /// Simultaneous directions each apply their own move. Returns how many
    /// commands fired.
    pub fn dispatch_held(&self, input: &InputState, player: &mut Player) -> usize {
        let mut fired = 0;
        for command in &self.commands {
            if input.is_direction_held(command.direction()) {
                command.execute(player);
                fired += 1;
            }
        }
        fired
    }
}
