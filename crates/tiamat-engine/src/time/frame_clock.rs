use std::time::{Duration, Instant};

/// One frame's timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct Tick {
    /// Seconds elapsed since the previous tick, clamped.
    pub dt: f32,

    /// Monotonic frame counter.
    pub frame: u64,
}

/// Delta-time source for a frame loop.
///
/// One clock per loop; call [`tick`](Self::tick) once per presented frame.
/// Deltas are clamped so that debugger pauses, minimized windows, and
/// scheduler stalls do not feed pathological values into timers and
/// simulation code.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame: u64,
    max_dt: Duration,
}

impl FrameClock {
    /// Upper clamp applied to a single frame delta.
    const DEFAULT_MAX_DT: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::with_max_dt(Self::DEFAULT_MAX_DT)
    }

    /// Creates a clock with a custom delta clamp.
    pub fn with_max_dt(max_dt: Duration) -> Self {
        Self {
            last: Instant::now(),
            frame: 0,
            max_dt,
        }
    }

    /// Resets the baseline without advancing the frame counter.
    ///
    /// Call after suspension or surface reconfiguration so the next delta
    /// does not cover the gap.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns the tick for this frame.
    pub fn tick(&mut self) -> Tick {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).min(self.max_dt);
        self.last = now;

        let tick = Tick {
            dt: dt.as_secs_f32(),
            frame: self.frame,
        };
        self.frame = self.frame.wrapping_add(1);
        tick
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
