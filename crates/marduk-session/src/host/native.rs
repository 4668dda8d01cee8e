use crate::core::{App, DragTarget};
use crate::device::{BackendFactory, SessionError};
use crate::gesture::GestureDispatcher;
use crate::input::InputEvent;
use crate::session::{FrameOutcome, LifecycleState, PausedFlag, Session, SessionConfig};

/// Platform lifecycle notifications, as delivered by the activity glue.
#[derive(Debug)]
pub enum LifecycleEvent<'a, W: ?Sized> {
    /// A native window is available (first one or a replacement).
    WindowCreated(&'a W),
    /// The native window is about to be destroyed.
    WindowDestroyed,
    FocusGained,
    FocusLost,
    LowMemory,
    /// Orientation or another configuration changed. Geometry is picked up
    /// by the next frame.
    ConfigChanged,
    /// The activity is being destroyed.
    Destroy,
}

/// Activity-level router between the platform and one [`Session`].
///
/// Owns the backend factory, the application and its overlay. Lifecycle
/// events map onto session operations; motion input runs through the
/// gesture dispatcher.
pub struct NativeHost<F, A, O>
where
    F: BackendFactory,
    A: App<F::Surface>,
    O: DragTarget,
{
    session: Session<F::Window, F::Surface>,
    factory: F,
    config: SessionConfig,
    gestures: GestureDispatcher,
    app: A,
    overlay: O,
    has_focus: bool,
}

impl<F, A, O> NativeHost<F, A, O>
where
    F: BackendFactory,
    A: App<F::Surface>,
    O: DragTarget,
{
    pub fn new(factory: F, config: SessionConfig, app: A, overlay: O) -> Self {
        Self {
            session: Session::new(),
            factory,
            gestures: GestureDispatcher::new(config.gestures.clone()),
            config,
            app,
            overlay,
            has_focus: true,
        }
    }

    pub fn handle_lifecycle(
        &mut self,
        event: LifecycleEvent<'_, F::Window>,
    ) -> Result<(), SessionError> {
        match event {
            LifecycleEvent::WindowCreated(window) => match self.session.state() {
                LifecycleState::Uninitialized => self.session.initialize(
                    &mut self.factory,
                    Some(window),
                    self.config.variant,
                    &mut self.app,
                ),
                _ => self.session.resume(Some(window), &mut self.app),
            },

            LifecycleEvent::WindowDestroyed => {
                self.cancel_gestures();
                self.session.term_display(&mut self.app);
                Ok(())
            }

            LifecycleEvent::FocusGained => {
                self.has_focus = true;
                Ok(())
            }

            LifecycleEvent::FocusLost => {
                self.has_focus = false;
                self.cancel_gestures();
                Ok(())
            }

            LifecycleEvent::LowMemory => {
                self.session.trim_memory();
                Ok(())
            }

            LifecycleEvent::ConfigChanged => {
                log::debug!("configuration changed");
                Ok(())
            }

            LifecycleEvent::Destroy => {
                self.cancel_gestures();
                self.session.terminate(&mut self.app);
                Ok(())
            }
        }
    }

    /// True when a frame would actually be drawn.
    pub fn is_ready(&self) -> bool {
        self.session.state() == LifecycleState::Running
            && !self.session.is_paused()
            && (self.has_focus || !self.config.pause_on_focus_loss)
    }

    pub fn frame(&mut self) -> FrameOutcome {
        if !self.is_ready() {
            return FrameOutcome::Skipped;
        }
        self.session.draw_frame(&mut self.app)
    }

    /// Feeds one input event to the gesture pipeline. Returns whether it was
    /// consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        self.gestures
            .handle_input(event, &mut self.overlay, &mut self.app)
    }

    pub fn session(&self) -> &Session<F::Window, F::Surface> {
        &self.session
    }

    pub fn paused_flag(&self) -> PausedFlag {
        self.session.paused_flag()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut O {
        &mut self.overlay
    }

    fn cancel_gestures(&mut self) {
        self.gestures.cancel(&mut self.overlay, &mut self.app);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::device::BackendVariant;
    use crate::input::{MotionAction, MotionEvent, TouchPointer};
    use crate::session::testing::{Gesture, MockFactory, MockWindow, RecordingApp};

    /// Claims drags that start in the top 50 logical pixels.
    #[derive(Default)]
    struct Toolbar {
        dragging: bool,
        ends: u32,
    }

    impl DragTarget for Toolbar {
        fn begin_drag(&mut self, _x: f32, y: f32) -> bool {
            self.dragging = y < 50.0;
            self.dragging
        }

        fn drag_move(&mut self, _x: f32, _y: f32) -> bool {
            self.dragging
        }

        fn end_drag(&mut self) {
            self.dragging = false;
            self.ends += 1;
        }
    }

    type TestHost = NativeHost<MockFactory, RecordingApp, Toolbar>;

    fn host(variant: BackendVariant) -> TestHost {
        let config = SessionConfig {
            variant,
            ..SessionConfig::default()
        };
        NativeHost::new(MockFactory::new(), config, RecordingApp::default(), Toolbar::default())
    }

    fn touch(action: MotionAction, x: f32, y: f32, t_ms: u64) -> InputEvent {
        InputEvent::Motion(MotionEvent::new(
            action,
            vec![TouchPointer::new(0, x, y)],
            Duration::from_millis(t_ms),
        ))
    }

    // ── lifecycle routing ────────────────────────────────────────────────

    #[test]
    fn first_window_initializes_later_windows_resume() {
        let mut h = host(BackendVariant::SwapchainRecreate);
        let window = MockWindow::new(720, 1280);

        h.handle_lifecycle(LifecycleEvent::WindowCreated(&window)).unwrap();
        assert_eq!(h.session().state(), LifecycleState::Running);
        assert_eq!(h.frame(), FrameOutcome::Rendered);

        h.handle_lifecycle(LifecycleEvent::WindowDestroyed).unwrap();
        assert!(h.paused_flag().is_paused());
        assert_eq!(h.frame(), FrameOutcome::Skipped);

        h.handle_lifecycle(LifecycleEvent::WindowCreated(&window)).unwrap();
        assert_eq!(h.frame(), FrameOutcome::Rendered);
        assert_eq!(h.factory.counters.surfaces_created.get(), 2);
        assert_eq!(h.factory.counters.live_surfaces(), 1);
    }

    #[test]
    fn fatal_init_is_reported() {
        let mut h = NativeHost::new(
            MockFactory::failing(),
            SessionConfig::default(),
            RecordingApp::default(),
            Toolbar::default(),
        );
        let err = h
            .handle_lifecycle(LifecycleEvent::WindowCreated(&MockWindow::new(1, 1)))
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(!h.is_ready());
    }

    #[test]
    fn focus_loss_pauses_drawing_when_configured() {
        let mut h = host(BackendVariant::ContextSuspend);
        let window = MockWindow::new(100, 100);
        h.handle_lifecycle(LifecycleEvent::WindowCreated(&window)).unwrap();

        h.handle_lifecycle(LifecycleEvent::FocusLost).unwrap();
        assert_eq!(h.frame(), FrameOutcome::Skipped);
        // Focus is a host concern; the session itself keeps running.
        assert!(!h.session().is_paused());

        h.handle_lifecycle(LifecycleEvent::FocusGained).unwrap();
        assert_eq!(h.frame(), FrameOutcome::Rendered);

        h.config.pause_on_focus_loss = false;
        h.handle_lifecycle(LifecycleEvent::FocusLost).unwrap();
        assert_eq!(h.frame(), FrameOutcome::Rendered);
    }

    #[test]
    fn low_memory_trims_without_state_change() {
        let mut h = host(BackendVariant::ContextSuspend);
        h.handle_lifecycle(LifecycleEvent::WindowCreated(&MockWindow::new(10, 10)))
            .unwrap();
        h.handle_lifecycle(LifecycleEvent::LowMemory).unwrap();
        h.handle_lifecycle(LifecycleEvent::ConfigChanged).unwrap();

        assert_eq!(h.factory.counters.invalidates.get(), 1);
        assert_eq!(h.session().state(), LifecycleState::Running);
    }

    #[test]
    fn destroy_terminates_for_good() {
        let mut h = host(BackendVariant::SwapchainRecreate);
        let window = MockWindow::new(10, 10);
        h.handle_lifecycle(LifecycleEvent::WindowCreated(&window)).unwrap();
        h.handle_lifecycle(LifecycleEvent::Destroy).unwrap();

        assert_eq!(h.session().state(), LifecycleState::Terminated);
        assert_eq!(h.factory.counters.live_surfaces(), 0);
        assert!(matches!(
            h.handle_lifecycle(LifecycleEvent::WindowCreated(&window)),
            Err(SessionError::Terminated)
        ));
    }

    // ── input routing ────────────────────────────────────────────────────

    #[test]
    fn toolbar_drag_never_reaches_app() {
        let mut h = host(BackendVariant::SwapchainRecreate);
        assert!(h.handle_input(&touch(MotionAction::Down, 100.0, 20.0, 0)));
        assert!(h.handle_input(&touch(MotionAction::Move, 160.0, 20.0, 16)));
        assert!(h.handle_input(&touch(MotionAction::Up, 160.0, 20.0, 400)));

        assert!(h.app().gestures.is_empty());
        assert_eq!(h.overlay().ends, 1);
    }

    #[test]
    fn canvas_drag_reaches_app() {
        let mut h = host(BackendVariant::SwapchainRecreate);
        h.handle_input(&touch(MotionAction::Down, 100.0, 300.0, 0));
        h.handle_input(&touch(MotionAction::Move, 120.0, 310.0, 16));
        h.handle_input(&touch(MotionAction::Up, 120.0, 310.0, 400));

        assert_eq!(
            h.app().gestures,
            vec![
                Gesture::Begin(100.0, 300.0),
                Gesture::Move(120.0, 310.0),
                Gesture::End
            ]
        );
    }

    #[test]
    fn window_loss_mid_drag_ends_it() {
        let mut h = host(BackendVariant::SwapchainRecreate);
        h.handle_lifecycle(LifecycleEvent::WindowCreated(&MockWindow::new(10, 10)))
            .unwrap();
        h.handle_input(&touch(MotionAction::Down, 100.0, 300.0, 0));
        h.handle_lifecycle(LifecycleEvent::WindowDestroyed).unwrap();

        assert_eq!(h.app().gestures.last(), Some(&Gesture::End));

        // The lifted finger after the restart produces nothing stale.
        h.handle_input(&touch(MotionAction::Up, 100.0, 300.0, 50));
        let ends = h
            .app()
            .gestures
            .iter()
            .filter(|g| **g == Gesture::End)
            .count();
        assert_eq!(ends, 1);
    }
}
