/// One acquired surface texture plus the encoder recording into it.
///
/// Hand it back to [`WgpuSurface::submit`](super::WgpuSurface::submit) in the
/// same frame; holding it blocks the next acquire.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// What the frame loop should do after a failed acquire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; try again next frame.
    Reconfigured,
    /// Transient; drop this frame.
    SkipFrame,
    /// Out of memory. Stop rendering.
    Fatal,
}
