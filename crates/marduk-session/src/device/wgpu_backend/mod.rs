//! wgpu implementation of both backend families.
//!
//! - explicit swapchain on Vulkan/Metal/DX12: [`WgpuDevice`] + `SwapchainPolicy`
//! - context suspend on GL: [`GlContextDevice`] + `ContextPolicy`

mod factory;
mod frame;
mod gpu;
mod init;
mod surface;

pub use factory::WgpuFactory;
pub use frame::{GpuFrame, SurfaceErrorAction};
pub use gpu::{GlContextDevice, WgpuDevice};
pub use init::GpuInit;
pub use surface::WgpuSurface;
