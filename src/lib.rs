//! PC Stats library
//!
//! Sensor abstraction, the background sampler and the display pump shared
//! by the console and desktop front ends.

pub mod core;
pub mod display;
pub mod elevation;
pub mod hardware;
pub mod i18n;
pub mod sampler;
