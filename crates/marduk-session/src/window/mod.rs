//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window and drives a [`NativeHost`] from
//! winit's application lifecycle.
//!
//! [`NativeHost`]: crate::host::NativeHost

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
