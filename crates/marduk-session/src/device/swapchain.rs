use super::{BackendVariant, LifecyclePolicy, ResumeError, SwapchainDevice};
use crate::core::App;

/// Lifecycle for explicit-swapchain backends.
///
/// The device lives for the whole session; the surface is released when the
/// window goes away and built again for the next one.
pub struct SwapchainPolicy<D: SwapchainDevice> {
    device: D,
    surface: Option<D::Surface>,
}

impl<D: SwapchainDevice> SwapchainPolicy<D> {
    pub fn new(device: D, surface: D::Surface) -> Self {
        Self {
            device,
            surface: Some(surface),
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Drops the current surface after the app has let go of it.
    fn release_surface(&mut self, app: &mut dyn App<D::Surface>) {
        if let Some(stale) = self.surface.take() {
            app.reset_swap_chain(None);
            drop(stale);
            log::debug!("swapchain surface released");
        }
    }
}

impl<D: SwapchainDevice> LifecyclePolicy for SwapchainPolicy<D> {
    type Window = D::Window;
    type Surface = D::Surface;

    fn variant(&self) -> BackendVariant {
        BackendVariant::SwapchainRecreate
    }

    fn resume(
        &mut self,
        window: Option<&D::Window>,
        app: &mut dyn App<D::Surface>,
    ) -> Result<(), ResumeError> {
        self.release_surface(app);
        self.device.wait_idle();

        let window = window.ok_or(ResumeError::NoWindow)?;
        let surface = self
            .device
            .create_surface(window)
            .map_err(|e| ResumeError::SurfaceCreation(format!("{e:#}")))?;

        let surface = self.surface.insert(surface);
        app.reset_swap_chain(Some(&*surface));
        Ok(())
    }

    fn suspend(&mut self, app: &mut dyn App<D::Surface>) {
        self.release_surface(app);
    }

    fn trim(&mut self) {}

    fn surface(&self) -> Option<&D::Surface> {
        self.surface.as_ref()
    }

    fn surface_mut(&mut self) -> Option<&mut D::Surface> {
        self.surface.as_mut()
    }

    fn teardown(&mut self, app: &mut dyn App<D::Surface>) {
        self.release_surface(app);
        self.device.wait_idle();
    }
}
