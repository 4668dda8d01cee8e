use std::sync::Arc;

use anyhow::{Context, Result};
use winit::window::Window;

use super::{GlContextDevice, GpuInit, WgpuDevice, WgpuSurface};
use crate::device::{BackendFactory, BackendVariant, BoxedPolicy, ContextPolicy, SwapchainPolicy};

/// Builds wgpu-backed policies for both backend families.
#[derive(Debug, Clone, Default)]
pub struct WgpuFactory {
    init: GpuInit,
}

impl WgpuFactory {
    pub fn new(init: GpuInit) -> Self {
        Self { init }
    }

    /// wgpu backends that implement a variant.
    pub fn backends_for(variant: BackendVariant) -> wgpu::Backends {
        match variant {
            BackendVariant::SwapchainRecreate => {
                wgpu::Backends::VULKAN | wgpu::Backends::METAL | wgpu::Backends::DX12
            }
            BackendVariant::ContextSuspend => wgpu::Backends::GL,
        }
    }
}

impl BackendFactory for WgpuFactory {
    type Window = Arc<Window>;
    type Surface = WgpuSurface;

    fn create(
        &mut self,
        window: &Arc<Window>,
        variant: BackendVariant,
    ) -> Result<BoxedPolicy<Arc<Window>, WgpuSurface>> {
        let backends = Self::backends_for(variant);
        let (gpu, surface) = pollster::block_on(WgpuDevice::new(window, backends, self.init.clone()))
            .with_context(|| format!("{variant} backend unavailable"))?;

        let policy: BoxedPolicy<Arc<Window>, WgpuSurface> = match variant {
            BackendVariant::SwapchainRecreate => Box::new(SwapchainPolicy::new(gpu, surface)),
            BackendVariant::ContextSuspend => {
                Box::new(ContextPolicy::new(GlContextDevice::new(gpu, surface)))
            }
        };
        Ok(policy)
    }
}
