//! Tiamat engine crate.
//!
//! A scene-driven 2D application framework: winit owns the window and
//! event loop, wgpu owns the surface, and this crate wires them to a small
//! game-facing core — scenes, a frame clock, countdown timers, a 2D
//! camera, and a recorded draw stream.

pub mod camera;
pub mod canvas;
pub mod coords;
pub mod device;
pub mod event;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;
