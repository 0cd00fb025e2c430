//! Fixed-step loop for the headless demo.
//!
//! The mock simulation advances in fixed steps from an accumulator, while
//! the render core runs once per displayed frame with the variable frame
//! time. Frame times are supplied by the caller so the demo can replay a
//! display at any refresh rate without a window.

use tracing::warn;

/// Fixed simulation timestep: 20 Hz, the cadence of the plant simulation.
pub const FIXED_DT: f64 = 1.0 / 20.0;

/// Longest frame time fed into the accumulator.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator state.
#[derive(Debug, Default)]
pub struct GameLoop {
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one frame of `frame_time` seconds.
    ///
    /// - `update_fn(fixed_dt, total_sim_time)` is called zero or more times
    ///   at the fixed rate.
    /// - `render_fn(frame_time)` is called exactly once with the clamped frame time.
    pub fn tick(
        &mut self,
        frame_time: f64,
        mut update_fn: impl FnMut(f64, f64),
        mut render_fn: impl FnMut(f64),
    ) {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;
        while self.accumulator >= FIXED_DT {
            update_fn(FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }

        render_fn(frame_time);
        self.frame_count += 1;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}
