//! The frame loop state machine
//!
//! `Initializing` loads the sprites, `Running` repeats
//! poll → dispatch → render → sync, and `Terminating` releases everything
//! in reverse order of acquisition. A failed load goes straight from
//! `Initializing` to `Terminating`.

use crate::clock::{Clock, SystemClock};
use crate::command::CommandHandler;
use crate::config::GameConfig;
use crate::error_log::ErrorLog;
use crate::input::{InputEvent, InputState};
use crate::scene::{Frame, Scene, Texture};
use crate::timer::FrameTimer;
use drift_core::{DriftError, Result, TextureId, Vec2};
use std::path::Path;

/// Windowing, rendering and input services the loop consumes
pub trait Platform {
    /// Drain pending events without blocking
    fn poll_events(&mut self, events: &mut Vec<InputEvent>);

    /// Decode an image file and upload it as a texture
    fn load_texture(&mut self, path: &Path) -> Result<Texture>;

    fn release_texture(&mut self, texture: TextureId);

    /// Clear and draw one frame
    fn render(&mut self, frame: &Frame) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Initializing,
    Running,
    Terminating,
}

/// Outcome of a finished run
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Frames rendered while running
    pub frames: u64,
    pub final_position: Vec2,
    /// Flushed error log lines, in the order the errors occurred
    pub errors: Vec<String>,
    /// 0 for a clean run, otherwise the status of the first error
    pub exit_code: i32,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Single-threaded game loop owning the platform, timer and scene
pub struct FrameLoop<P: Platform, C: Clock = SystemClock> {
    platform: P,
    timer: FrameTimer<C>,
    handler: CommandHandler,
    input: InputState,
    scene: Scene,
    errors: ErrorLog,
    state: LoopState,
    config: GameConfig,
    /// Textures in acquisition order
    loaded: Vec<TextureId>,
    events: Vec<InputEvent>,
    frames: u64,
}

impl<P: Platform> FrameLoop<P, SystemClock> {
    pub fn new(platform: P, config: GameConfig) -> Self {
        Self::with_clock(platform, config, SystemClock::new())
    }
}

impl<P: Platform, C: Clock> FrameLoop<P, C> {
    pub fn with_clock(platform: P, config: GameConfig, clock: C) -> Self {
        Self {
            platform,
            timer: FrameTimer::with_clock(config.timing.fps, clock),
            handler: CommandHandler::new(),
            input: InputState::with_bindings(config.input.clone()),
            scene: Scene::new(config.player.speed),
            errors: ErrorLog::new(),
            state: LoopState::Initializing,
            config,
            loaded: Vec::new(),
            events: Vec::new(),
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn timer(&self) -> &FrameTimer<C> {
        &self.timer
    }

    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Load the player then the floor sprite. On failure, everything already
    /// loaded is released, one error is logged and the loop is Terminating.
    pub fn initialize(&mut self) -> LoopState {
        if self.state != LoopState::Initializing {
            return self.state;
        }

        match self.load_sprites() {
            Ok(()) => {
                tracing::info!(fps = self.timer.target_fps(), "assets loaded, running");
                self.timer.start();
                self.state = LoopState::Running;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load assets");
                let (platform, loaded) = (&mut self.platform, &mut self.loaded);
                self.errors.cleanup(err.code(), || release_all(platform, loaded));
                self.state = LoopState::Terminating;
            }
        }
        self.state
    }

    fn load_sprites(&mut self) -> Result<()> {
        let player_path = self.config.player.sprite.clone();
        self.scene.player.texture = Some(self.load(&player_path)?);

        let floor_path = self.config.floor.sprite.clone();
        self.scene.floor.texture = Some(self.load(&floor_path)?);
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<Texture> {
        let texture = self.platform.load_texture(path)?;
        tracing::debug!(path = %path.display(), id = texture.id.0, "texture loaded");
        self.loaded.push(texture.id);
        Ok(texture)
    }

    /// Run one iteration. Returns the state after it.
    ///
    /// A quit request ends the iteration before anything is dispatched or drawn.
    pub fn step(&mut self) -> LoopState {
        if self.state != LoopState::Running {
            return self.state;
        }
        if self.frame_limit_reached() {
            tracing::info!(frames = self.frames, "frame limit reached");
            self.state = LoopState::Terminating;
            return self.state;
        }

        self.events.clear();
        self.platform.poll_events(&mut self.events);
        let mut quit = false;
        for event in self.events.drain(..) {
            quit |= self.input.process_event(event);
        }
        if quit {
            tracing::info!(frames = self.frames, "quit requested");
            self.state = LoopState::Terminating;
            return self.state;
        }

        self.handler.dispatch_held(&self.input, &mut self.scene.player);

        if let Err(err) = self.platform.render(&self.scene.frame()) {
            self.fail(err);
            return self.state;
        }
        self.frames += 1;

        self.timer.sync_to_frame_rate();
        self.state
    }

    fn frame_limit_reached(&self) -> bool {
        self.config
            .timing
            .frame_limit
            .is_some_and(|limit| self.frames >= limit)
    }

    fn fail(&mut self, err: DriftError) {
        tracing::error!(error = %err, "frame loop failed");
        self.errors.record(err.code());
        self.state = LoopState::Terminating;
    }

    /// Release resources, flush the error log and report.
    pub fn shutdown(&mut self) -> RunReport {
        self.state = LoopState::Terminating;
        self.timer.stop();
        release_all(&mut self.platform, &mut self.loaded);
        self.scene.player.texture = None;
        self.scene.floor.texture = None;

        let exit_code = self.errors.status();
        let errors = self.errors.flush();
        tracing::info!(frames = self.frames, exit_code, "frame loop finished");

        RunReport {
            frames: self.frames,
            final_position: self.scene.player.position,
            errors,
            exit_code,
        }
    }

    /// Run to completion. The platform is dropped before this returns.
    pub fn run(mut self) -> RunReport {
        if self.initialize() == LoopState::Running {
            while self.step() == LoopState::Running {}
        }
        self.shutdown()
    }
}

/// Release textures newest first
fn release_all<P: Platform>(platform: &mut P, loaded: &mut Vec<TextureId>) {
    while let Some(id) = loaded.pop() {
        platform.release_texture(id);
    }
}
