//! Activity-level glue between platform lifecycle callbacks and a session.

mod native;

pub use native::{LifecycleEvent, NativeHost};
