//! GPU device + surface management.
//!
//! Owns the wgpu Instance/Adapter/Device/Queue for the window, configures
//! the surface (swapchain), and hands out per-frame encoders/views. The
//! surface borrows the window through an `Arc`, so everything here is
//! `'static`.

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuOptions, SurfaceErrorAction};
