//! Rendering session lifecycle.
//!
//! A [`Session`] sequences OS lifecycle events (initialize, resume, term
//! display, trim, terminate) over whichever backend policy the factory
//! produced, and runs the per-frame [`GeometryReconciler`] before handing
//! the surface to the application.

mod config;
mod lifecycle;
mod reconcile;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{BACKEND_ENV, SessionConfig};
pub use lifecycle::{FrameOutcome, LifecycleState, PausedFlag, Session};
pub use reconcile::GeometryReconciler;
