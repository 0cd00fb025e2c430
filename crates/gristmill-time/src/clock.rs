//! Render-frame clock: elapsed time since start plus a global frame counter.

use tracing::debug;

/// Largest delta accepted per frame, in seconds.
///
/// A frame that took longer (debugger pause, window drag, backgrounded view)
/// is clamped so time-driven motion does not jump.
pub const MAX_FRAME_DELTA: f64 = 0.25;

/// Tracks render time and the global frame count.
///
/// Call [`tick`](Self::tick) exactly once at the start of every displayed
/// frame. Everything animated in the scene derives its phase from
/// [`elapsed`](Self::elapsed), so two frames with the same elapsed time
/// produce identical visual state.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    elapsed: f64,
    delta: f64,
    frame: u64,
}

impl FrameClock {
    /// Creates a clock at time zero, frame zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock by `dt` real seconds and returns the clamped delta.
    pub fn tick(&mut self, dt: f64) -> f64 {
        let mut dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if dt > MAX_FRAME_DELTA {
            debug!(
                "Frame delta {:.1}ms exceeds maximum, clamping to {:.1}ms",
                dt * 1000.0,
                MAX_FRAME_DELTA * 1000.0
            );
            dt = MAX_FRAME_DELTA;
        }
        self.delta = dt;
        self.elapsed += dt;
        self.frame = self.frame.wrapping_add(1);
        dt
    }

    /// Render seconds elapsed since the clock was created.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Delta applied by the most recent tick.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Number of ticks so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Global-frame throttle: true on every `divisor`-th frame.
    ///
    /// Useful for one-off callers that do not own a [`FrameThrottle`](crate::FrameThrottle)
    /// key. All such callers fire on the same frames.
    pub fn should_run_global(&self, divisor: u32) -> bool {
        self.frame % u64::from(divisor.max(1)) == 0
    }
}
