use std::fmt;

/// Rotation/mirroring the platform expects content to be pre-rotated by.
///
/// `Optimal` is only meaningful as a request: it asks the backend to pick
/// whatever matches the current display orientation. A descriptor read back
/// from a surface reports the transform actually in effect.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum SurfaceTransform {
    #[default]
    Optimal,
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
    HorizontalMirror,
    HorizontalMirrorRotate90,
    HorizontalMirrorRotate180,
    HorizontalMirrorRotate270,
}

impl SurfaceTransform {
    /// Returns true when the transform swaps the width and height axes.
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            SurfaceTransform::Rotate90
                | SurfaceTransform::Rotate270
                | SurfaceTransform::HorizontalMirrorRotate90
                | SurfaceTransform::HorizontalMirrorRotate270
        )
    }
}

impl fmt::Display for SurfaceTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Geometry of a presentation surface in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SurfaceDesc {
    pub width: u32,
    pub height: u32,
    pub pre_transform: SurfaceTransform,
}

impl SurfaceDesc {
    #[inline]
    pub const fn new(width: u32, height: u32, pre_transform: SurfaceTransform) -> Self {
        Self {
            width,
            height,
            pre_transform,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A presentable render target bound to a native window.
///
/// Dropping the surface releases it. Owners must not keep a surface alive
/// past the window it was created for.
pub trait PresentSurface {
    /// Asks the surface to re-fit itself to its window and returns the
    /// resulting descriptor.
    ///
    /// `size_hint == None` means "match the window". The transform is a hint
    /// as well; backends are free to ignore both, so callers must compare
    /// the returned descriptor instead of assuming the request took effect.
    fn refit(&mut self, size_hint: Option<(u32, u32)>, transform: SurfaceTransform) -> SurfaceDesc;

    /// Current descriptor without touching the backend.
    fn desc(&self) -> SurfaceDesc;
}
