use thiserror::Error;

use crate::event::{Signal, Subscription};

/// Error produced by [`Timer`] construction and configuration.
#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum TimerError {
    /// The wait time must be a positive, finite number of seconds.
    #[error("timer wait time must be positive and finite, got {0}")]
    InvalidWaitTime(f32),
}

/// Frame-driven countdown timer.
///
/// The timer does not schedule anything itself: the owning loop calls
/// [`update`](Self::update) once per tick with that frame's delta, and the
/// timer fires its timeout callbacks when the accumulated time crosses the
/// wait threshold.
///
/// A timer is constructed paused; call [`start`](Self::start) to arm it.
/// Oneshot timers pause themselves after firing, repeating timers re-arm
/// automatically.
///
/// A single `update` call fires at most once, however large its delta.
/// The timer is a per-tick polled primitive, not a free-running scheduler;
/// time beyond one threshold crossing within one call is dropped rather
/// than compensated with extra firings.
#[derive(Debug)]
pub struct Timer {
    wait_time: f32,
    oneshot: bool,
    elapsed: f32,
    paused: bool,
    timeout: Signal,
}

impl Timer {
    /// Creates a paused timer that fires after `wait_time` seconds.
    pub fn new(wait_time: f32, oneshot: bool) -> Result<Self, TimerError> {
        validate_wait_time(wait_time)?;
        Ok(Self {
            wait_time,
            oneshot,
            elapsed: 0.0,
            paused: true,
            timeout: Signal::new(),
        })
    }

    /// Seconds until the timer fires, measured from the last reset.
    pub fn wait_time(&self) -> f32 {
        self.wait_time
    }

    /// Changes the wait threshold. Takes effect on the next `update`.
    pub fn set_wait_time(&mut self, wait_time: f32) -> Result<(), TimerError> {
        validate_wait_time(wait_time)?;
        self.wait_time = wait_time;
        Ok(())
    }

    pub fn oneshot(&self) -> bool {
        self.oneshot
    }

    pub fn set_oneshot(&mut self, oneshot: bool) {
        self.oneshot = oneshot;
    }

    /// Accumulated time since the last reset. `0 <= elapsed < wait_time`
    /// between firings.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Resumes accumulation. Idempotent.
    pub fn start(&mut self) {
        self.paused = false;
    }

    /// Pauses accumulation without resetting the accumulated time.
    /// Idempotent.
    pub fn stop(&mut self) {
        self.paused = true;
    }

    /// Registers a timeout callback; callbacks run in registration order.
    pub fn on_timeout<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut() + 'static,
    {
        self.timeout.connect(callback)
    }

    /// Removes a previously registered timeout callback.
    pub fn disconnect(&mut self, sub: Subscription) -> bool {
        self.timeout.disconnect(sub)
    }

    /// Advances the timer by `delta` seconds.
    ///
    /// No-op while paused. When the accumulated time reaches the wait
    /// threshold the accumulator is reset to zero *before* the callbacks
    /// run, so callback panics cannot leave a partially advanced timer
    /// behind. Oneshot timers pause after the callbacks return.
    pub fn update(&mut self, delta: f32) {
        debug_assert!(delta.is_finite() && delta >= 0.0, "bad frame delta {delta}");

        if self.paused {
            return;
        }

        self.elapsed += delta;
        if self.elapsed >= self.wait_time {
            self.elapsed = 0.0;
            self.timeout.emit();

            if self.oneshot {
                self.paused = true;
            }
        }
    }
}

fn validate_wait_time(wait_time: f32) -> Result<(), TimerError> {
    if wait_time > 0.0 && wait_time.is_finite() {
        Ok(())
    } else {
        Err(TimerError::InvalidWaitTime(wait_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn counting_timer(wait_time: f32, oneshot: bool) -> (Timer, Rc<RefCell<u32>>) {
        let fired = Rc::new(RefCell::new(0));
        let mut timer = Timer::new(wait_time, oneshot).unwrap();
        let counter = Rc::clone(&fired);
        timer.on_timeout(move || *counter.borrow_mut() += 1);
        (timer, fired)
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn rejects_non_positive_wait_time() {
        assert_eq!(Timer::new(0.0, false).unwrap_err(), TimerError::InvalidWaitTime(0.0));
        assert_eq!(Timer::new(-1.0, true).unwrap_err(), TimerError::InvalidWaitTime(-1.0));
        assert!(Timer::new(f32::NAN, false).is_err());
        assert!(Timer::new(f32::INFINITY, false).is_err());
    }

    #[test]
    fn set_wait_time_validates_too() {
        let mut timer = Timer::new(1.0, false).unwrap();
        assert!(timer.set_wait_time(-0.5).is_err());
        assert_eq!(timer.wait_time(), 1.0);
        assert!(timer.set_wait_time(2.5).is_ok());
        assert_eq!(timer.wait_time(), 2.5);
    }

    #[test]
    fn starts_paused_and_inert() {
        let (mut timer, fired) = counting_timer(1.0, false);
        timer.update(10.0);
        assert_eq!(*fired.borrow(), 0);
        assert_eq!(timer.elapsed(), 0.0);
        assert!(timer.is_paused());
    }

    // ── repeating ─────────────────────────────────────────────────────────

    #[test]
    fn repeating_timer_fires_once_per_threshold_update() {
        let (mut timer, fired) = counting_timer(1.0, false);
        timer.start();

        for expected in 1..=5 {
            timer.update(1.0);
            assert_eq!(*fired.borrow(), expected);
            assert_eq!(timer.elapsed(), 0.0);
        }
        assert!(!timer.is_paused());
    }

    #[test]
    fn accumulates_sub_threshold_deltas() {
        let (mut timer, fired) = counting_timer(1.0, false);
        timer.start();

        timer.update(0.4);
        timer.update(0.4);
        assert_eq!(*fired.borrow(), 0);
        timer.update(0.2); // cumulative sum reaches the threshold here
        assert_eq!(*fired.borrow(), 1);
        assert_eq!(timer.elapsed(), 0.0);
    }

    #[test]
    fn large_hitch_fires_only_once() {
        // delta >= 2 * wait_time still produces a single firing: the timer
        // is polled per tick, not a catch-up scheduler.
        let (mut timer, fired) = counting_timer(0.5, false);
        timer.start();
        timer.update(5.0);
        assert_eq!(*fired.borrow(), 1);
        assert_eq!(timer.elapsed(), 0.0);
    }

    // ── oneshot ───────────────────────────────────────────────────────────

    #[test]
    fn oneshot_pauses_after_firing() {
        let (mut timer, fired) = counting_timer(1.0, true);
        timer.start();

        timer.update(0.6);
        assert_eq!(*fired.borrow(), 0);
        assert!((timer.elapsed() - 0.6).abs() < f32::EPSILON);

        timer.update(0.5);
        assert_eq!(*fired.borrow(), 1);
        assert_eq!(timer.elapsed(), 0.0);
        assert!(timer.is_paused());

        // Further updates are no-ops until restarted.
        timer.update(3.0);
        assert_eq!(*fired.borrow(), 1);

        timer.start();
        timer.update(1.0);
        assert_eq!(*fired.borrow(), 2);
    }

    // ── stop ──────────────────────────────────────────────────────────────

    #[test]
    fn stop_freezes_elapsed_without_reset() {
        let (mut timer, fired) = counting_timer(1.0, false);
        timer.start();
        timer.update(0.7);
        timer.stop();

        timer.update(0.7);
        timer.update(0.7);
        assert_eq!(*fired.borrow(), 0);
        assert!((timer.elapsed() - 0.7).abs() < f32::EPSILON);

        // Resuming continues from the frozen accumulator.
        timer.start();
        timer.update(0.3);
        assert_eq!(*fired.borrow(), 1);
    }

    // ── callbacks ─────────────────────────────────────────────────────────

    #[test]
    fn callbacks_run_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut timer = Timer::new(1.0, false).unwrap();

        for tag in ["a", "b", "c"] {
            let order = Rc::clone(&order);
            timer.on_timeout(move || order.borrow_mut().push(tag));
        }

        timer.start();
        timer.update(1.0);
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn disconnected_callback_stops_firing() {
        let (mut timer, fired) = counting_timer(1.0, false);
        let extra = Rc::new(RefCell::new(0));
        let sub = {
            let extra = Rc::clone(&extra);
            timer.on_timeout(move || *extra.borrow_mut() += 1)
        };

        timer.start();
        timer.update(1.0);
        assert_eq!(*extra.borrow(), 1);

        assert!(timer.disconnect(sub));
        timer.update(1.0);
        assert_eq!(*extra.borrow(), 1);
        assert_eq!(*fired.borrow(), 2);
    }
}
