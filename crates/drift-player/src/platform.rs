//! winit + wgpu implementation of the runtime `Platform`
//!
//! Events are pumped without blocking once per frame instead of handing
//! control to winit's `run_app`, so the frame loop stays in charge.

use drift_core::{DriftError, Result, TextureId};
use drift_render::{RenderContext, SpriteRenderer};
use drift_runtime::{Frame, InputEvent, Platform, Texture, WindowConfig};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowId};

/// Pumps allowed for the platform to deliver `resumed` during startup
const STARTUP_PUMPS: usize = 100;
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

/// Window, renderer and event queue for a single run
pub struct WinitPlatform {
    // Field order is drop order: renderer and window go before the event loop
    app: PlayerApp,
    event_loop: EventLoop<()>,
}

impl WinitPlatform {
    /// Create the event loop, window and renderer.
    pub fn open(config: &WindowConfig) -> Result<Self> {
        let mut event_loop =
            EventLoop::new().map_err(|e| DriftError::WindowError(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = PlayerApp::new(config.clone());
        for _ in 0..STARTUP_PUMPS {
            let status = event_loop.pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut app);
            if let Some(err) = app.startup_error.take() {
                return Err(err);
            }
            if let PumpStatus::Exit(code) = status {
                return Err(DriftError::WindowError(format!(
                    "event loop exited during startup with code {code}"
                )));
            }
            if app.renderer.is_some() {
                tracing::info!(
                    title = %config.title,
                    width = config.width,
                    height = config.height,
                    fullscreen = config.fullscreen,
                    "window opened"
                );
                return Ok(Self { app, event_loop });
            }
        }

        Err(DriftError::WindowError(
            "platform never resumed the application".into(),
        ))
    }

    fn renderer(&mut self) -> Result<&mut SpriteRenderer> {
        self.app
            .renderer
            .as_mut()
            .ok_or_else(|| DriftError::RenderError("renderer is not initialized".into()))
    }
}

impl Platform for WinitPlatform {
    fn poll_events(&mut self, events: &mut Vec<InputEvent>) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app);
        if let PumpStatus::Exit(code) = status {
            tracing::debug!(code, "event loop exited");
            self.app.pending.push(InputEvent::Quit);
        }
        events.append(&mut self.app.pending);
    }

    fn load_texture(&mut self, path: &Path) -> Result<Texture> {
        let (id, size) = self.renderer()?.load_texture(path)?;
        Ok(Texture { id, size })
    }

    fn release_texture(&mut self, texture: TextureId) {
        if let Some(renderer) = self.app.renderer.as_mut() {
            renderer.release_texture(texture);
        }
    }

    fn render(&mut self, frame: &Frame) -> Result<()> {
        self.renderer()?.render(frame)?;
        Ok(())
    }
}

/// winit application handler that records input for the frame loop
struct PlayerApp {
    config: WindowConfig,
    renderer: Option<SpriteRenderer>,
    window: Option<Arc<Window>>,
    pending: Vec<InputEvent>,
    startup_error: Option<DriftError>,
}

impl PlayerApp {
    fn new(config: WindowConfig) -> Self {
        Self {
            config,
            renderer: None,
            window: None,
            pending: Vec::new(),
            startup_error: None,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut window_attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        if self.config.fullscreen {
            window_attrs = window_attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| DriftError::WindowError(e.to_string()))?,
        );
        self.window = Some(window.clone());

        let context = pollster::block_on(RenderContext::new(window, self.config.vsync))?;
        self.renderer = Some(SpriteRenderer::new(context));
        Ok(())
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.initialize(event_loop) {
            tracing::error!(error = %err, "failed to open window");
            self.startup_error = Some(err);
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.pending.push(InputEvent::Quit);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed if !event.repeat => {
                            self.pending.push(InputEvent::KeyDown(key_code));
                        }
                        ElementState::Pressed => {}
                        ElementState::Released => {
                            self.pending.push(InputEvent::KeyUp(key_code));
                        }
                    }
                }
            }

            _ => {}
        }
    }
}
