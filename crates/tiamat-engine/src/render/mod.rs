//! GPU rendering.
//!
//! [`FlatRenderer`] consumes a frame's [`crate::canvas::Canvas`] and issues
//! wgpu commands.
//!
//! Convention:
//! - CPU geometry is logical pixels (top-left origin, +Y down), in world
//!   space when a camera is set.
//! - The vertex shader applies the camera affine, then converts to NDC
//!   using a viewport uniform.

mod ctx;
mod flat;

pub use ctx::{RenderCtx, RenderTarget};
pub use flat::FlatRenderer;
