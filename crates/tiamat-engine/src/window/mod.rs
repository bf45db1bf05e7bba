//! Window + runtime loop.
//!
//! Owns the winit `EventLoop` and the single application window, and wires
//! them to the GPU layer and the scene [`crate::scene::Director`]. Game
//! code never touches winit types; events arrive through
//! [`crate::input::InputState`] and frames through the scene lifecycle.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
