use super::{BackendVariant, LifecyclePolicy, ResumeError, SuspendableDevice};
use crate::core::App;

/// Lifecycle for backends whose device suspends its own context.
///
/// The surface is never rebuilt here; the device re-binds its existing
/// context to whatever window it is handed on resume.
pub struct ContextPolicy<D: SuspendableDevice> {
    device: D,
}

impl<D: SuspendableDevice> ContextPolicy<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Tells the app its surface is going away, then suspends the device.
    fn release_surface(&mut self, app: &mut dyn App<D::Surface>) {
        if self.device.surface().is_some() {
            app.reset_swap_chain(None);
        }
        self.device.suspend();
    }
}

impl<D: SuspendableDevice> LifecyclePolicy for ContextPolicy<D> {
    type Window = D::Window;
    type Surface = D::Surface;

    fn variant(&self) -> BackendVariant {
        BackendVariant::ContextSuspend
    }

    fn resume(
        &mut self,
        window: Option<&D::Window>,
        app: &mut dyn App<D::Surface>,
    ) -> Result<(), ResumeError> {
        let window = window.ok_or(ResumeError::NoWindow)?;
        let status = self.device.resume(window);
        if !status.is_success() {
            return Err(ResumeError::Context(status));
        }

        // The device may have re-bound to a new surface object.
        app.reset_swap_chain(self.device.surface());
        Ok(())
    }

    fn suspend(&mut self, app: &mut dyn App<D::Surface>) {
        self.release_surface(app);
    }

    fn trim(&mut self) {
        self.device.invalidate();
    }

    fn surface(&self) -> Option<&D::Surface> {
        self.device.surface()
    }

    fn surface_mut(&mut self) -> Option<&mut D::Surface> {
        self.device.surface_mut()
    }

    fn teardown(&mut self, app: &mut dyn App<D::Surface>) {
        self.release_surface(app);
        self.device.invalidate();
    }
}
