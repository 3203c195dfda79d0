//! Windowing backend adapters.

pub mod winit;
