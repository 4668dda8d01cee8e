use std::fmt;
use std::str::FromStr;

use anyhow::Result;

use super::{PresentSurface, ResumeError, ResumeStatus};
use crate::core::App;

/// GPU API family a session runs on. Chosen once at startup.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BackendVariant {
    /// Explicit swapchain model (Vulkan, Metal, DX12): the surface is
    /// destroyed and recreated for every new window, the device survives.
    #[default]
    SwapchainRecreate,
    /// Implicit context model (GLES): the device suspends and resumes its
    /// own context and the surface bound to it.
    ContextSuspend,
}

impl BackendVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendVariant::SwapchainRecreate => "swapchain",
            BackendVariant::ContextSuspend => "context",
        }
    }
}

impl fmt::Display for BackendVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "swapchain" | "vulkan" | "vk" | "metal" | "dx12" => Ok(BackendVariant::SwapchainRecreate),
            "context" | "gles" | "gl" | "opengl" => Ok(BackendVariant::ContextSuspend),
            other => anyhow::bail!("unknown backend variant '{other}'"),
        }
    }
}

/// Variant-specific lifecycle strategy.
///
/// Owns the device, its context and the current surface. A session holds
/// exactly one policy for its whole life; every variant difference lives
/// behind this trait.
pub trait LifecyclePolicy {
    type Window: ?Sized;
    type Surface: PresentSurface;

    fn variant(&self) -> BackendVariant;

    /// Re-acquires a surface for `window`. `None` models a platform that
    /// reported a window event without a usable handle.
    fn resume(
        &mut self,
        window: Option<&Self::Window>,
        app: &mut dyn App<Self::Surface>,
    ) -> Result<(), ResumeError>;

    /// Stops presenting. Called at most once per running period.
    fn suspend(&mut self, app: &mut dyn App<Self::Surface>);

    /// Releases what can be released under memory pressure.
    fn trim(&mut self);

    fn surface(&self) -> Option<&Self::Surface>;

    fn surface_mut(&mut self) -> Option<&mut Self::Surface>;

    /// Final release of every GPU resource.
    fn teardown(&mut self, app: &mut dyn App<Self::Surface>);
}

/// Policy object as stored by a session.
pub type BoxedPolicy<W, S> = Box<dyn LifecyclePolicy<Window = W, Surface = S>>;

/// Creates the device, context and first surface for a variant.
pub trait BackendFactory {
    type Window: ?Sized + 'static;
    type Surface: PresentSurface + 'static;

    /// Fails when the variant has no working GPU binding for `window`.
    fn create(
        &mut self,
        window: &Self::Window,
        variant: BackendVariant,
    ) -> Result<BoxedPolicy<Self::Window, Self::Surface>>;
}

/// Device half of the explicit swapchain model.
pub trait SwapchainDevice {
    type Window: ?Sized;
    type Surface: PresentSurface;

    fn create_surface(&mut self, window: &Self::Window) -> Result<Self::Surface>;

    /// Blocks until all submitted GPU work has finished.
    fn wait_idle(&self);
}

/// Device half of the context-suspend model.
///
/// The device owns the surface: suspending tears down the window binding,
/// resuming re-binds the existing context to a new window.
pub trait SuspendableDevice {
    type Window: ?Sized;
    type Surface: PresentSurface;

    fn resume(&mut self, window: &Self::Window) -> ResumeStatus;

    fn suspend(&mut self);

    /// Drops context-level resources. Must be safe to call while the device
    /// is not rendering.
    fn invalidate(&mut self);

    fn surface(&self) -> Option<&Self::Surface>;

    fn surface_mut(&mut self) -> Option<&mut Self::Surface>;
}
