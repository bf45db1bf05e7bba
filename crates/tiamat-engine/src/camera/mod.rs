//! 2D camera.
//!
//! [`Camera2D`] is a pure value object: three fields plus an externally
//! supplied viewport size determine every derived value. The runtime (or
//! any caller) passes the viewport in explicitly; the camera never queries
//! window state.

mod camera2d;

pub use camera2d::{Camera2D, CameraError};
