//! Drift Runtime - Frame loop infrastructure
//!
//! Provides the building blocks of the game loop:
//! - `FrameTimer` / `Clock`: pausable timer that caps the loop's frame rate
//! - `InputState`: held-key tracking with configurable bindings
//! - `CommandHandler`: maps held directions to player moves
//! - `ErrorLog`: bounded error record flushed at the end of a run
//! - `FrameLoop` / `Platform`: the poll → dispatch → render → sync state machine

mod clock;
mod command;
mod config;
mod error_log;
mod frame_loop;
mod input;
mod scene;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{CommandHandler, Direction, MoveCommand};
pub use config::{FloorConfig, GameConfig, PlayerConfig, TimingConfig, WindowConfig};
pub use error_log::{ErrorLog, MAX_ERROR_COUNT};
pub use frame_loop::{FrameLoop, LoopState, Platform, RunReport};
pub use input::{InputBindings, InputEvent, InputState};
pub use scene::{Floor, Frame, Player, Scene, SpriteDraw, Texture, DEFAULT_PLAYER_SPEED};
pub use timer::{FrameTimer, TimerState, DEFAULT_FPS};
