use std::sync::Arc;

use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::{choose_alpha_mode, choose_surface_format};
use super::{GpuInit, WgpuSurface};
use crate::device::{ResumeStatus, SuspendableDevice, SwapchainDevice};

/// wgpu instance, adapter, device and queue.
///
/// The queue plays the role of the immediate context. Surfaces are created
/// from here and keep clones of the device and queue handles.
pub struct WgpuDevice {
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    init: GpuInit,
}

impl WgpuDevice {
    /// Creates a device restricted to `backends` together with the first
    /// surface for `window`.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(
        window: &Arc<Window>,
        backends: wgpu::Backends,
        init: GpuInit,
    ) -> Result<(Self, WgpuSurface)> {
        drawable_extent(window.inner_size())?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(Arc::clone(window))
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .with_context(|| format!("no GPU adapter for backends {backends:?}"))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("marduk-session device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        log::info!("using adapter {:?}", adapter.get_info());

        let gpu = Self {
            instance,
            adapter,
            device,
            queue,
            init,
        };
        let surface = gpu.configure(surface, window)?;
        Ok((gpu, surface))
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Builds a new surface for `window` with the device's settings.
    ///
    /// Fails for a window without drawable area; wgpu cannot configure a
    /// 0x0 surface.
    pub fn create_window_surface(&self, window: &Arc<Window>) -> Result<WgpuSurface> {
        drawable_extent(window.inner_size())?;
        let surface = self
            .instance
            .create_surface(Arc::clone(window))
            .context("failed to create wgpu surface")?;
        self.configure(surface, window)
    }

    /// Processes finished work without blocking so freed resources are
    /// reclaimed.
    pub fn reclaim(&self) {
        if let Err(e) = self.device.poll(wgpu::PollType::Poll) {
            log::warn!("device poll failed: {e:?}");
        }
    }

    fn configure(&self, surface: wgpu::Surface<'static>, window: &Arc<Window>) -> Result<WgpuSurface> {
        let caps = surface.get_capabilities(&self.adapter);
        let format = choose_surface_format(&caps, self.init.prefer_srgb)
            .context("surface is incompatible with the adapter")?;
        let alpha_mode = choose_alpha_mode(&caps, self.init.alpha_mode);

        let (width, height) = drawable_extent(window.inner_size())?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: self.init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: self.init.desired_maximum_frame_latency,
        };

        Ok(WgpuSurface::new(
            surface,
            Arc::clone(window),
            self.device.clone(),
            self.queue.clone(),
            config,
        ))
    }
}

/// Surface extent for a window size, or an error when either side is zero.
fn drawable_extent(size: PhysicalSize<u32>) -> Result<(u32, u32)> {
    anyhow::ensure!(
        size.width > 0 && size.height > 0,
        "window has zero size ({}x{})",
        size.width,
        size.height
    );
    Ok((size.width, size.height))
}

impl SwapchainDevice for WgpuDevice {
    type Window = Arc<Window>;
    type Surface = WgpuSurface;

    fn create_surface(&mut self, window: &Arc<Window>) -> Result<WgpuSurface> {
        self.create_window_surface(window)
    }

    fn wait_idle(&self) {
        if let Err(e) = self.device.poll(wgpu::PollType::wait_indefinitely()) {
            log::warn!("waiting for GPU idle failed: {e:?}");
        }
    }
}

/// GL-family device: the context survives suspension, only its window
/// surface is dropped and re-bound.
pub struct GlContextDevice {
    gpu: WgpuDevice,
    surface: Option<WgpuSurface>,
}

impl GlContextDevice {
    pub fn new(gpu: WgpuDevice, surface: WgpuSurface) -> Self {
        Self {
            gpu,
            surface: Some(surface),
        }
    }

    pub fn gpu(&self) -> &WgpuDevice {
        &self.gpu
    }
}

impl SuspendableDevice for GlContextDevice {
    type Window = Arc<Window>;
    type Surface = WgpuSurface;

    fn resume(&mut self, window: &Arc<Window>) -> ResumeStatus {
        if let Some(current) = &self.surface {
            if current.window().id() == window.id() {
                return ResumeStatus::Success;
            }
        }

        // Release the old binding before creating the new one.
        self.surface = None;

        if drawable_extent(window.inner_size()).is_err() {
            return ResumeStatus::BadNativeWindow;
        }

        match self.gpu.create_window_surface(window) {
            Ok(surface) => {
                self.surface = Some(surface);
                ResumeStatus::Success
            }
            Err(e) => {
                log::warn!("GL surface re-bind failed: {e:#}");
                ResumeStatus::NotInitialized
            }
        }
    }

    fn suspend(&mut self) {
        if self.surface.take().is_some() {
            log::debug!("GL window surface released");
        }
    }

    fn invalidate(&mut self) {
        self.gpu.reclaim();
    }

    fn surface(&self) -> Option<&WgpuSurface> {
        self.surface.as_ref()
    }

    fn surface_mut(&mut self) -> Option<&mut WgpuSurface> {
        self.surface.as_mut()
    }
}
