//! Dotfield - interactive particle backdrop
//!
//! Controls:
//! - Move the cursor to pull particles around
//! - Left click: ripple
//! - Space: toggle the active (focus) mode
//! - F: toggle fullscreen
//! - Escape: quit

use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use dotfield::config::AppConfig;
use dotfield::systems::{RenderError, RenderSystem, WindowSystem, WinitScheduler};
use dotfield_core::{Backdrop, Bindings, FieldConfig, Listeners, ParticleField, PointerEvent};
use dotfield_input::PointerTracker;
use dotfield_render::SquareBatch;

/// Everything that exists only while a window is open
struct Running {
    window: WindowSystem,
    renderer: RenderSystem,
    backdrop: Backdrop<SquareBatch, WinitScheduler>,
    /// Keeps the field subscribed to `App::pointer`
    _bindings: Bindings,
}

/// Main application state
struct App {
    config: AppConfig,
    field_config: FieldConfig,
    pointer: Listeners<PointerEvent>,
    tracker: PointerTracker,
    running: Option<Running>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let field_config = config.to_field_config().unwrap_or_else(|e| {
            log::warn!("{}. Using default field settings.", e);
            FieldConfig::default()
        });

        let tracker = PointerTracker::new()
            .with_tracked(config.pointer.tracked_events())
            .with_idle_timeout(config.pointer.idle_timeout());

        Self {
            config,
            field_config,
            pointer: Listeners::new(),
            tracker,
            running: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running, Box<dyn std::error::Error>> {
        let window = WindowSystem::create(event_loop, &self.config.window)?;
        let renderer = RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            self.config.window.vsync,
        )?;

        let (width, height) = window.inner_size();
        let field =
            ParticleField::new(width, height, self.field_config.clone(), SquareBatch::new())?;
        log::info!(
            "Created {}x{} field with {} particles (gap {})",
            width,
            height,
            field.particle_count(),
            field.gap()
        );

        let mut backdrop = Backdrop::new(field, WinitScheduler::new(window.window().clone()));
        let bindings = backdrop.attach(&self.pointer);
        backdrop.start();

        window.update_title(backdrop.field().particle_count(), false);

        Ok(Running {
            window,
            renderer,
            backdrop,
            _bindings: bindings,
        })
    }

    fn dispatch(&self, event: Option<PointerEvent>) {
        if let Some(event) = event {
            self.pointer.emit(&event);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => self.running = Some(running),
            Err(e) => {
                log::error!("Failed to start: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(running) = &mut self.running {
                    running.renderer.resize(physical_size.width, physical_size.height);
                    running.backdrop.resize(physical_size.width, physical_size.height);
                    running.window.update_title(
                        running.backdrop.field().particle_count(),
                        running.backdrop.field().is_active(),
                    );
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.tracker.cursor_moved(position.x, position.y, Instant::now());
                self.dispatch(event);
            }

            WindowEvent::CursorLeft { .. } => {
                let event = self.tracker.cursor_left();
                self.dispatch(event);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.tracker.mouse_input(button, state);
                self.dispatch(event);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                match key {
                    KeyCode::Escape => event_loop.exit(),
                    KeyCode::Space => {
                        if let Some(running) = &mut self.running {
                            let active = running.backdrop.toggle_active();
                            log::info!("Active mode: {}", if active { "ON" } else { "OFF" });
                            running
                                .window
                                .update_title(running.backdrop.field().particle_count(), active);
                        }
                    }
                    KeyCode::KeyF => {
                        if let Some(running) = &self.running {
                            running.window.toggle_fullscreen();
                        }
                    }
                    _ => {}
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(running) = &mut self.running else {
                    return;
                };
                let Some(handle) = running.backdrop.scheduler_mut().take_due() else {
                    return;
                };
                if !running.backdrop.frame(handle) {
                    return;
                }

                let result = {
                    let field = running.backdrop.field();
                    running.renderer.render_frame(field.surface())
                };
                match result {
                    Ok(()) => {}
                    Err(RenderError::SurfaceLost) => running.renderer.recover_surface(),
                    Err(RenderError::OutOfMemory) => {
                        log::error!("GPU out of memory");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("{}", e),
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let event = self.tracker.poll(Instant::now());
        self.dispatch(event);

        match self.tracker.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = AppConfig::load();
    let log_level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    log::info!("Starting Dotfield");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
