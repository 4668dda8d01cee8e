use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Vec2;
use crate::core::{App, DragTarget};
use crate::device::{SessionError, WgpuFactory, WgpuSurface};
use crate::host::{LifecycleEvent, NativeHost};
use crate::input::platform::winit::{
    MOUSE_POINTER_ID, mouse_phase, to_logical, translate_key, translate_touch,
};
use crate::input::{InputEvent, PointerSample, TouchPhase, TouchTracker};
use crate::session::{FrameOutcome, SessionConfig};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "marduk".to_string(),
            initial_size: LogicalSize::new(720.0, 1280.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the winit event loop until the window closes or the application
    /// exits. A fatal session error ends the loop and is returned.
    pub fn run<A, O>(config: RuntimeConfig, session: SessionConfig, app: A, overlay: O) -> Result<()>
    where
        A: App<WgpuSurface> + 'static,
        O: DragTarget + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let factory = WgpuFactory::new(session.gpu.clone());
        let mut state = RuntimeState::new(config, NativeHost::new(factory, session, app, overlay));

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(e) => Err(e).context("rendering session failed"),
            None => Ok(()),
        }
    }
}

struct RuntimeState<A, O>
where
    A: App<WgpuSurface> + 'static,
    O: DragTarget + 'static,
{
    config: RuntimeConfig,
    host: NativeHost<WgpuFactory, A, O>,
    window: Option<Arc<Window>>,

    touches: TouchTracker,
    epoch: Instant,
    cursor: PointerSample,

    fatal: Option<SessionError>,
}

impl<A, O> RuntimeState<A, O>
where
    A: App<WgpuSurface> + 'static,
    O: DragTarget + 'static,
{
    fn new(config: RuntimeConfig, host: NativeHost<WgpuFactory, A, O>) -> Self {
        Self {
            config,
            host,
            window: None,
            touches: TouchTracker::new(),
            epoch: Instant::now(),
            cursor: Vec2::ZERO,
            fatal: None,
        }
    }

    fn lifecycle(&mut self, event_loop: &ActiveEventLoop, event: LifecycleEvent<'_, Arc<Window>>) {
        let Err(e) = self.host.handle_lifecycle(event) else {
            return;
        };

        if e.is_fatal() {
            log::error!("{e}");
            self.fatal = Some(e);
            event_loop.exit();
        } else {
            log::warn!("{e}; waiting for the next window");
        }
    }

    fn contact(&mut self, id: u64, phase: TouchPhase, pos: PointerSample) {
        let time = self.epoch.elapsed();
        if let Some(motion) = self.touches.update(id, phase, pos, time) {
            self.host.handle_input(&InputEvent::Motion(motion));
        }
    }

    fn ensure_window(&self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        if let Some(window) = &self.window {
            return Ok(Arc::clone(window));
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        Ok(Arc::new(window))
    }
}

impl<A, O> ApplicationHandler for RuntimeState<A, O>
where
    A: App<WgpuSurface> + 'static,
    O: DragTarget + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = match self.ensure_window(event_loop) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{e:#}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(Arc::clone(&window));

        self.lifecycle(event_loop, LifecycleEvent::WindowCreated(&window));
        window.request_redraw();
    }

    fn suspended(&mut self, event_loop: &ActiveEventLoop) {
        self.touches.reset();
        self.lifecycle(event_loop, LifecycleEvent::WindowDestroyed);
    }

    fn memory_warning(&mut self, event_loop: &ActiveEventLoop) {
        self.lifecycle(event_loop, LifecycleEvent::LowMemory);
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        self.lifecycle(event_loop, LifecycleEvent::Destroy);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw while a frame can actually be drawn.
        if self.host.is_ready() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone().filter(|w| w.id() == window_id) else {
            return;
        };

        match &event {
            WindowEvent::CloseRequested => {
                self.lifecycle(event_loop, LifecycleEvent::Destroy);
                event_loop.exit();
            }

            WindowEvent::Focused(true) => {
                self.lifecycle(event_loop, LifecycleEvent::FocusGained);
            }

            WindowEvent::Focused(false) => {
                self.touches.reset();
                self.lifecycle(event_loop, LifecycleEvent::FocusLost);
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.lifecycle(event_loop, LifecycleEvent::ConfigChanged);
                window.request_redraw();
            }

            WindowEvent::Touch(touch) => {
                let (id, phase, pos) = translate_touch(&window, touch);
                self.contact(id, phase, pos);
            }

            // The primary mouse button stands in for one finger.
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = to_logical(&window, *position);
                self.contact(MOUSE_POINTER_ID, TouchPhase::Moved, self.cursor);
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.contact(MOUSE_POINTER_ID, mouse_phase(*state), self.cursor);
            }

            WindowEvent::CursorLeft { .. } => {
                if self.touches.is_tracking(MOUSE_POINTER_ID) {
                    self.contact(MOUSE_POINTER_ID, mouse_phase(ElementState::Released), self.cursor);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.host.handle_input(&translate_key(event));
            }

            WindowEvent::RedrawRequested => {
                if self.host.frame() == FrameOutcome::ExitRequested {
                    self.lifecycle(event_loop, LifecycleEvent::Destroy);
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}
