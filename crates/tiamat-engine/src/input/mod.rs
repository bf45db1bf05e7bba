//! Input facade.
//!
//! The engine does not poll devices: the runtime translates windowing
//! events into calls on [`InputState`], and scenes read the resulting
//! state (held keys/buttons, per-frame transitions, pointer position,
//! wheel delta). The public API exposes no winit types.

mod state;
mod types;

pub use state::InputState;
pub use types::{Key, MouseButton};
