use crate::core::App;
use crate::device::{PresentSurface, SurfaceDesc, SurfaceTransform};

/// Per-frame surface geometry check.
///
/// Platforms do not reliably report rotation or resizes to the native
/// layer, so every frame the surface is asked to re-fit and the result is
/// compared with the last known geometry. The stored geometry is written
/// here and nowhere else.
#[derive(Debug, Clone, Default)]
pub struct GeometryReconciler {
    current: SurfaceDesc,
}

impl GeometryReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known geometry.
    #[inline]
    pub fn geometry(&self) -> SurfaceDesc {
        self.current
    }

    /// Records the geometry of a freshly created surface without notifying.
    pub fn capture(&mut self, desc: SurfaceDesc) {
        self.current = desc;
    }

    /// Re-fits `surface` and notifies `app` when width, height or
    /// pre-transform changed. Returns whether a notification was sent.
    pub fn reconcile<S: PresentSurface>(&mut self, surface: &mut S, app: &mut dyn App<S>) -> bool {
        let desc = surface.refit(None, SurfaceTransform::Optimal);
        if desc == self.current {
            return false;
        }

        log::debug!(
            "surface geometry {}x{} ({}) -> {}x{} ({})",
            self.current.width,
            self.current.height,
            self.current.pre_transform,
            desc.width,
            desc.height,
            desc.pre_transform
        );

        self.current = desc;
        app.on_resize(desc.width, desc.height);
        true
    }
}
