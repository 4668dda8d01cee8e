/// Device and surface parameters for the wgpu backend.
///
/// Shared by both backend families; the family only decides which wgpu
/// backends are requested.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// FIFO is the only mode every mobile driver is required to support.
    pub present_mode: wgpu::PresentMode,

    /// Requested alpha mode; replaced by a supported one when unavailable.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,

    /// Limits requested from the device. Defaults to the downlevel WebGL2
    /// set so GLES-class hardware can satisfy it.
    pub required_limits: wgpu::Limits,

    /// Hint only; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,

    pub power_preference: wgpu::PowerPreference,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            desired_maximum_frame_latency: 2,
            power_preference: wgpu::PowerPreference::LowPower,
        }
    }
}
