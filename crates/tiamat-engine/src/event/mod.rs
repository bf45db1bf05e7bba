//! Callback registration primitives.
//!
//! [`Signal`] is a plain observer list: callbacks are registered against a
//! [`Subscription`] handle, removed by handle, and invoked synchronously in
//! registration order. No threading, no queuing.

mod signal;

pub use signal::{Signal, Subscription};
