use marduk_session::core::{App, AppControl, DragTarget, InputController};
use marduk_session::device::{PresentSurface, SurfaceErrorAction, WgpuSurface};
use marduk_session::input::PointerSample;
use marduk_session::logging::{LoggingConfig, init_logging};
use marduk_session::session::SessionConfig;
use marduk_session::time::FrameTime;
use marduk_session::window::{Runtime, RuntimeConfig};

/// Height of the strip at the top of the window that belongs to the overlay.
const TOOLBAR_HEIGHT: f32 = 64.0;

/// Overlay stand-in: a toolbar whose slider claims drags that start on it.
#[derive(Debug, Default)]
struct Toolbar {
    dragging: bool,
    /// Slider position in [0, 1], driven by horizontal drags on the strip.
    value: f32,
    width: f32,
}

impl Toolbar {
    fn new(width: f32) -> Self {
        Self {
            value: 0.5,
            width,
            ..Self::default()
        }
    }

    fn slide_to(&mut self, x: f32) {
        self.value = (x / self.width.max(1.0)).clamp(0.0, 1.0);
    }
}

impl DragTarget for Toolbar {
    fn begin_drag(&mut self, x: f32, y: f32) -> bool {
        self.dragging = y < TOOLBAR_HEIGHT;
        if self.dragging {
            self.slide_to(x);
        }
        self.dragging
    }

    fn drag_move(&mut self, x: f32, _y: f32) -> bool {
        if self.dragging {
            self.slide_to(x);
        }
        self.dragging
    }

    fn end_drag(&mut self) {
        if self.dragging {
            log::info!("toolbar slider at {:.2}", self.value);
        }
        self.dragging = false;
    }
}

/// Clears the screen with a color the user steers: dragging rotates the
/// hue, pinching changes brightness, a double tap resets both.
struct ClearColorApp {
    hue: f32,
    brightness: f32,
    last_drag: Option<PointerSample>,
    pinch_span: Option<f32>,
    size: (u32, u32),
}

impl ClearColorApp {
    fn new() -> Self {
        Self {
            hue: 0.6,
            brightness: 0.5,
            last_drag: None,
            pinch_span: None,
            size: (0, 0),
        }
    }

    fn color(&self) -> wgpu::Color {
        let (r, g, b) = hue_to_rgb(self.hue);
        let v = self.brightness as f64;
        wgpu::Color {
            r: r as f64 * v,
            g: g as f64 * v,
            b: b as f64 * v,
            a: 1.0,
        }
    }
}

impl DragTarget for ClearColorApp {
    fn begin_drag(&mut self, x: f32, y: f32) -> bool {
        self.last_drag = Some(PointerSample::new(x, y));
        true
    }

    fn drag_move(&mut self, x: f32, y: f32) -> bool {
        let p = PointerSample::new(x, y);
        if let Some(last) = self.last_drag.replace(p) {
            let width = self.size.0.max(1) as f32;
            self.hue = (self.hue + (p.x - last.x) / width).rem_euclid(1.0);
        }
        true
    }

    fn end_drag(&mut self) {
        self.last_drag = None;
    }
}

impl InputController for ClearColorApp {
    fn start_pinch(&mut self, a: PointerSample, b: PointerSample) {
        self.pinch_span = Some(a.distance(b));
    }

    fn pinch_move(&mut self, a: PointerSample, b: PointerSample) {
        let span = a.distance(b);
        if let Some(prev) = self.pinch_span.replace(span) {
            if prev > 0.0 {
                self.brightness = (self.brightness * span / prev).clamp(0.05, 1.0);
            }
        }
    }

    fn end_pinch(&mut self) {
        self.pinch_span = None;
    }

    fn double_tap(&mut self, _at: PointerSample) {
        *self = Self {
            size: self.size,
            ..Self::new()
        };
    }
}

impl App<WgpuSurface> for ClearColorApp {
    fn on_resize(&mut self, width: u32, height: u32) {
        log::info!("resized to {width}x{height}");
        self.size = (width, height);
    }

    fn reset_swap_chain(&mut self, surface: Option<&WgpuSurface>) {
        match surface {
            Some(s) => {
                let desc = s.desc();
                self.size = (desc.width, desc.height);
                log::info!("rendering to {:?} at {}x{}", s.format(), desc.width, desc.height);
            }
            None => log::info!("surface released"),
        }
    }

    fn on_frame(&mut self, surface: &mut WgpuSurface, _time: FrameTime) -> AppControl {
        let mut frame = match surface.begin_frame() {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("failed to acquire frame: {e}");
                return match surface.handle_surface_error(e) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        {
            let _pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("marduk-sample clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.color()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        surface.submit(frame);
        AppControl::Continue
    }
}

/// Fully saturated color for a hue in [0, 1).
fn hue_to_rgb(h: f32) -> (f32, f32, f32) {
    let h6 = h.rem_euclid(1.0) * 6.0;
    let x = 1.0 - (h6 % 2.0 - 1.0).abs();
    match h6 as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let session = SessionConfig::from_env()?;
    log::info!("starting with the {} backend", session.variant);

    let runtime = RuntimeConfig {
        title: "marduk sample".to_string(),
        ..RuntimeConfig::default()
    };
    let toolbar = Toolbar::new(runtime.initial_size.width as f32);

    Runtime::run(runtime, session, ClearColorApp::new(), toolbar)
}
