//! Scene lifecycle.
//!
//! This module defines the contract between the runtime loop and game
//! code: a [`Scene`] is loaded once, updated and drawn every frame, and
//! unloaded when replaced or on shutdown. The [`Director`] owns the active
//! scene and performs transitions; scenes request transitions (and exit)
//! through buffered [`SceneCtx`] commands, applied after the current
//! callback returns.
//!
//! One level of polymorphism (`Box<dyn Scene>`), nothing deeper.

mod director;
mod lifecycle;

pub use director::Director;
pub use lifecycle::{Scene, SceneCommand, SceneCtx};
