use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::GeometryReconciler;
use crate::core::{App, AppControl};
use crate::device::{
    BackendFactory, BackendVariant, BoxedPolicy, PresentSurface, SessionError, SurfaceDesc,
};
use crate::time::FrameClock;

/// Main lifecycle state of a session.
///
/// Memory trimming is a side effect and never shows up here.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Initializing,
    Running,
    Suspended,
    Terminated,
}

/// Shared view of the paused flag.
///
/// The session is the only writer. Clones can be handed to another thread
/// (a render thread, a watchdog) that only needs to know whether drawing is
/// currently allowed.
#[derive(Debug, Clone)]
pub struct PausedFlag(Arc<AtomicBool>);

impl PausedFlag {
    fn new(paused: bool) -> Self {
        Self(Arc::new(AtomicBool::new(paused)))
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self, paused: bool) {
        self.0.store(paused, Ordering::Release);
    }
}

/// Result of one [`Session::draw_frame`] call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// Paused or no surface; nothing was submitted.
    Skipped,
    Rendered,
    /// The application asked to stop.
    ExitRequested,
}

/// Owner of the device, context and surface of one rendering activity.
///
/// Every GPU resource lives inside the [`LifecyclePolicy`] chosen at
/// initialization; this type only sequences lifecycle events, keeps the
/// paused flag honest and runs the per-frame geometry check.
///
/// [`LifecyclePolicy`]: crate::device::LifecyclePolicy
pub struct Session<W: ?Sized + 'static, S: PresentSurface + 'static> {
    state: LifecycleState,
    policy: Option<BoxedPolicy<W, S>>,
    geometry: GeometryReconciler,
    paused: PausedFlag,
    clock: FrameClock,
}

impl<W: ?Sized + 'static, S: PresentSurface + 'static> Default for Session<W, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: ?Sized + 'static, S: PresentSurface + 'static> Session<W, S> {
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Uninitialized,
            policy: None,
            geometry: GeometryReconciler::new(),
            paused: PausedFlag::new(true),
            clock: FrameClock::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused.is_paused()
    }

    pub fn paused_flag(&self) -> PausedFlag {
        self.paused.clone()
    }

    /// Last reconciled surface geometry.
    pub fn geometry(&self) -> SurfaceDesc {
        self.geometry.geometry()
    }

    /// Backend family in use, once initialized.
    pub fn variant(&self) -> Option<BackendVariant> {
        self.policy.as_ref().map(|p| p.variant())
    }

    pub fn surface(&self) -> Option<&S> {
        self.policy.as_ref().and_then(|p| p.surface())
    }

    /// Creates device, context and surface for `variant` and starts
    /// running.
    ///
    /// Any failure here is fatal: the session moves to
    /// [`LifecycleState::Terminated`] and never renders.
    pub fn initialize<F>(
        &mut self,
        factory: &mut F,
        window: Option<&W>,
        variant: BackendVariant,
        app: &mut dyn App<S>,
    ) -> Result<(), SessionError>
    where
        F: BackendFactory<Window = W, Surface = S> + ?Sized,
    {
        match self.state {
            LifecycleState::Uninitialized => {}
            LifecycleState::Terminated => return Err(SessionError::Terminated),
            state => {
                log::warn!("initialize ignored, session is {state:?}");
                return Ok(());
            }
        }

        log::info!("initializing session ({variant} backend)");
        self.state = LifecycleState::Initializing;

        let created = match window {
            Some(window) => factory.create(window, variant).map_err(|e| format!("{e:#}")),
            None => Err("no native window".to_owned()),
        };

        let mut policy = match created {
            Ok(policy) => policy,
            Err(reason) => return Err(self.fail_init(variant, reason)),
        };

        let Some(surface) = policy.surface_mut() else {
            return Err(self.fail_init(variant, "backend created no surface".to_owned()));
        };

        self.geometry.capture(surface.desc());
        app.reset_swap_chain(Some(&*surface));

        self.policy = Some(policy);
        self.state = LifecycleState::Running;
        self.clock.resume();
        self.paused.set(false);

        let g = self.geometry.geometry();
        log::info!(
            "session running: {}x{} ({})",
            g.width,
            g.height,
            g.pre_transform
        );
        Ok(())
    }

    /// Re-acquires a surface for a new native window.
    ///
    /// On failure the session stays paused in
    /// [`LifecycleState::Suspended`]; the caller retries on the next
    /// window event.
    pub fn resume(&mut self, window: Option<&W>, app: &mut dyn App<S>) -> Result<(), SessionError> {
        let policy = match (self.state, self.policy.as_mut()) {
            (LifecycleState::Terminated, _) => return Err(SessionError::Terminated),
            (LifecycleState::Running | LifecycleState::Suspended, Some(policy)) => policy,
            (state, _) => return Err(SessionError::NotInitialized(state)),
        };

        match policy.resume(window, app) {
            Ok(()) => {
                self.state = LifecycleState::Running;
                self.clock.resume();
                self.paused.set(false);
                log::info!("session resumed");
                Ok(())
            }
            Err(e) => {
                self.paused.set(true);
                self.state = LifecycleState::Suspended;
                log::warn!("resume failed, staying paused: {e}");
                Err(e.into())
            }
        }
    }

    /// The native window is going away. Stops presenting immediately.
    ///
    /// Calling this while already suspended only re-asserts the paused flag.
    pub fn term_display(&mut self, app: &mut dyn App<S>) {
        self.paused.set(true);

        if self.state != LifecycleState::Running {
            log::debug!("term display ignored, session is {:?}", self.state);
            return;
        }

        if let Some(policy) = self.policy.as_mut() {
            policy.suspend(app);
        }
        self.state = LifecycleState::Suspended;
        log::info!("display terminated, session suspended");
    }

    /// Releases what the backend can spare under memory pressure. Never
    /// changes the lifecycle state.
    pub fn trim_memory(&mut self) {
        if let Some(policy) = self.policy.as_mut() {
            log::info!("trimming memory ({} backend)", policy.variant());
            policy.trim();
        }
    }

    /// Reconciles surface geometry and hands the surface to the application
    /// for one frame. Does nothing while paused.
    pub fn draw_frame(&mut self, app: &mut dyn App<S>) -> FrameOutcome {
        if self.paused.is_paused() || self.state != LifecycleState::Running {
            return FrameOutcome::Skipped;
        }

        let Some(surface) = self.policy.as_mut().and_then(|p| p.surface_mut()) else {
            return FrameOutcome::Skipped;
        };

        self.geometry.reconcile(surface, app);

        let time = self.clock.tick();
        match app.on_frame(surface, time) {
            AppControl::Continue => FrameOutcome::Rendered,
            AppControl::Exit => FrameOutcome::ExitRequested,
        }
    }

    /// Releases every GPU resource. The session cannot be used afterwards.
    pub fn terminate(&mut self, app: &mut dyn App<S>) {
        if self.state == LifecycleState::Terminated {
            return;
        }

        self.paused.set(true);
        if let Some(mut policy) = self.policy.take() {
            policy.teardown(app);
        }
        self.state = LifecycleState::Terminated;
        log::info!("session terminated");
    }

    fn fail_init(&mut self, variant: BackendVariant, reason: String) -> SessionError {
        log::error!("failed to initialize {variant} backend: {reason}");
        self.policy = None;
        self.state = LifecycleState::Terminated;
        self.paused.set(true);
        SessionError::FatalInit { variant, reason }
    }
}
