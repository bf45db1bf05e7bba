//! Fill styles for canvas commands.
//!
//! v0 supports solid colors only; the clear color and every shape fill is
//! a straight-alpha [`Color`].

mod color;

pub use color::Color;
