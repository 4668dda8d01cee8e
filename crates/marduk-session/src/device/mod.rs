//! GPU device + surface lifecycle.
//!
//! This module is responsible for:
//! - the surface contract and its geometry descriptor
//! - the two backend families and their lifecycle policies
//! - the wgpu implementation of both families

mod context;
mod error;
mod policy;
mod surface;
mod swapchain;
mod wgpu_backend;

pub use context::ContextPolicy;
pub use error::{ResumeError, ResumeStatus, SessionError};
pub use policy::{
    BackendFactory, BackendVariant, BoxedPolicy, LifecyclePolicy, SuspendableDevice,
    SwapchainDevice,
};
pub use surface::{PresentSurface, SurfaceDesc, SurfaceTransform};
pub use swapchain::SwapchainPolicy;
pub use wgpu_backend::{
    GlContextDevice, GpuFrame, GpuInit, SurfaceErrorAction, WgpuDevice, WgpuFactory, WgpuSurface,
};
