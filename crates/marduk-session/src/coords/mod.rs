//! Coordinate types shared by the input pipeline and applications.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down

mod vec2;

pub use vec2::Vec2;
