//! Marduk session crate.
//!
//! Keeps a mobile rendering session alive across OS-driven interruptions
//! (window loss, backgrounding, rotation, memory pressure) and routes
//! multi-touch input through gesture recognizers to an overlay and the
//! application.

pub mod core;
pub mod device;
pub mod gesture;
pub mod host;
pub mod input;
pub mod session;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
