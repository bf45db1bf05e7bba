/// Opaque handle identifying one registered callback.
///
/// Handles are unique per `Signal` for its whole lifetime; a disconnected
/// handle is never reused.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Subscription(u64);

/// Synchronous observer list.
///
/// Callbacks run on the emitting thread, in registration order. Emission
/// borrows the signal mutably, so a callback cannot re-enter the signal it
/// is registered on (the borrow checker enforces what the frame-loop
/// threading model assumes).
#[derive(Default)]
pub struct Signal {
    next_id: u64,
    slots: Vec<(u64, Box<dyn FnMut()>)>,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback and returns its handle.
    pub fn connect<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut() + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.slots.push((id, Box::new(callback)));
        Subscription(id)
    }

    /// Removes the callback registered under `sub`.
    ///
    /// Returns `false` if the handle was already disconnected.
    pub fn disconnect(&mut self, sub: Subscription) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(id, _)| *id != sub.0);
        self.slots.len() != before
    }

    /// Invokes every registered callback, in registration order.
    pub fn emit(&mut self) {
        for (_, callback) in &mut self.slots {
            callback();
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl std::fmt::Debug for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emit_runs_callbacks_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::new();

        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            signal.connect(move || order.borrow_mut().push(tag));
        }

        signal.emit();
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn disconnect_removes_exactly_one() {
        let count = Rc::new(RefCell::new(0));
        let mut signal = Signal::new();

        let a = {
            let count = Rc::clone(&count);
            signal.connect(move || *count.borrow_mut() += 1)
        };
        {
            let count = Rc::clone(&count);
            signal.connect(move || *count.borrow_mut() += 10);
        }

        assert!(signal.disconnect(a));
        assert!(!signal.disconnect(a));
        assert_eq!(signal.len(), 1);

        signal.emit();
        assert_eq!(*count.borrow(), 10);
    }

    #[test]
    fn emit_on_empty_signal_is_a_noop() {
        let mut signal = Signal::new();
        assert!(signal.is_empty());
        signal.emit();
    }

    #[test]
    fn handles_stay_unique_after_disconnect() {
        let mut signal = Signal::new();
        let a = signal.connect(|| {});
        signal.disconnect(a);
        let b = signal.connect(|| {});
        assert_ne!(a, b);
    }
}
