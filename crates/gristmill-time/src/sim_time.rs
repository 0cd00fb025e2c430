//! Smoothly advancing simulated time of day.
//!
//! The simulation publishes its authoritative hour at a low, rate-limited
//! cadence. Rendering wants a value that moves every frame, so
//! [`TimeSimulation`] integrates real frame time against the acceleration
//! factor and reconciles against the authoritative hour, snapping whenever
//! the two drift apart by more than a fixed threshold.

use tracing::trace;

/// Length of the simulated day in hours.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Default maximum divergence between smooth and authoritative time.
pub const DEFAULT_DRIFT_THRESHOLD_HOURS: f64 = 0.1;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Wrap an hour value into `[0, 24)`.
///
/// Uses a Euclidean modulo so negative inputs wrap backwards. Results that
/// round to exactly 24.0, negative zero and non-finite inputs map to 0.0.
pub fn wrap_hour(hour: f64) -> f64 {
    if !hour.is_finite() {
        return 0.0;
    }
    let wrapped = hour.rem_euclid(HOURS_PER_DAY);
    if wrapped >= HOURS_PER_DAY || wrapped == 0.0 {
        0.0
    } else {
        wrapped
    }
}

/// Shortest distance between two hours on the 24-hour circle.
pub fn hour_distance(a: f64, b: f64) -> f64 {
    let direct = (wrap_hour(a) - wrap_hour(b)).abs();
    direct.min(HOURS_PER_DAY - direct)
}

/// Current time-of-day state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeState {
    /// Smooth hour used for rendering, `[0, 24)`.
    pub hour: f64,
    /// Simulated seconds per real second.
    pub acceleration: f64,
    /// Last hour published by the simulation, `[0, 24)`.
    pub authoritative: f64,
    /// Whether the simulation is paused.
    pub paused: bool,
}

/// Result of one [`TimeSimulation::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeStep {
    /// Hour after integration, before reconciliation.
    pub predicted: f64,
    /// Hour after reconciliation (what rendering should use).
    pub hour: f64,
    /// Whether the smooth hour was reset to the authoritative hour.
    pub snapped: bool,
}

/// Integrates and reconciles the smooth hour once per frame.
#[derive(Clone, Debug)]
pub struct TimeSimulation {
    state: TimeState,
    drift_threshold: f64,
}

impl TimeSimulation {
    /// Start at the authoritative hour with the default drift threshold.
    pub fn new(authoritative_hour: f64, acceleration: f64) -> Self {
        let hour = wrap_hour(authoritative_hour);
        Self {
            state: TimeState {
                hour,
                acceleration,
                authoritative: hour,
                paused: false,
            },
            drift_threshold: DEFAULT_DRIFT_THRESHOLD_HOURS,
        }
    }

    /// Override the drift threshold (hours). Negative values are clamped to zero.
    pub fn with_drift_threshold(mut self, hours: f64) -> Self {
        self.drift_threshold = hours.max(0.0);
        self
    }

    /// Record the latest values published by the simulation.
    pub fn set_authoritative(&mut self, hour: f64, acceleration: f64, paused: bool) {
        self.state.authoritative = wrap_hour(hour);
        self.state.acceleration = if acceleration.is_finite() {
            acceleration
        } else {
            0.0
        };
        self.state.paused = paused;
    }

    /// Advance by `real_dt` seconds and reconcile.
    pub fn step(&mut self, real_dt: f64) -> TimeStep {
        let state = &mut self.state;

        if state.paused || state.acceleration == 0.0 {
            state.hour = state.authoritative;
            return TimeStep {
                predicted: state.authoritative,
                hour: state.hour,
                snapped: true,
            };
        }

        let dt = if real_dt.is_finite() {
            real_dt.max(0.0)
        } else {
            0.0
        };
        let predicted = wrap_hour(state.hour + dt * (state.acceleration / SECONDS_PER_HOUR));
        let drift = hour_distance(predicted, state.authoritative);

        let snapped = drift > self.drift_threshold;
        if snapped {
            trace!(
                predicted,
                authoritative = state.authoritative,
                drift,
                "smooth time drifted past threshold, snapping"
            );
            state.hour = state.authoritative;
        } else {
            state.hour = predicted;
        }

        TimeStep {
            predicted,
            hour: state.hour,
            snapped,
        }
    }

    /// Smooth hour for rendering.
    pub fn hour(&self) -> f64 {
        self.state.hour
    }

    /// Snapshot of the full state.
    pub fn state(&self) -> TimeState {
        self.state
    }

    /// Active drift threshold in hours.
    pub fn drift_threshold(&self) -> f64 {
        self.drift_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_hour_normalizes_edges() {
        assert_eq!(wrap_hour(24.0), 0.0);
        assert_eq!(wrap_hour(-0.0).to_bits(), 0.0f64.to_bits());
        assert_eq!(wrap_hour(-1.0), 23.0);
        assert_eq!(wrap_hour(49.5), 1.5);
        assert_eq!(wrap_hour(-1e-18), 0.0);
        assert_eq!(wrap_hour(f64::NAN), 0.0);
    }

    #[test]
    fn test_hour_distance_wraps() {
        assert!((hour_distance(23.9, 0.1) - 0.2).abs() < 1e-9);
        assert!((hour_distance(0.1, 23.9) - 0.2).abs() < 1e-9);
        assert!((hour_distance(6.0, 18.0) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_half_second_at_hour_per_second_predicts_half_hour() {
        let mut sim = TimeSimulation::new(6.0, 3600.0);
        let step = sim.step(0.5);
        assert!((step.predicted - 6.5).abs() < 1e-9);
        // 0.5h of divergence exceeds the default 0.1h threshold.
        assert!(step.snapped);
        assert_eq!(step.hour, 6.0);
    }

    #[test]
    fn test_half_second_with_loose_threshold_keeps_prediction() {
        let mut sim = TimeSimulation::new(6.0, 3600.0).with_drift_threshold(1.0);
        let step = sim.step(0.5);
        assert!(!step.snapped);
        assert!((sim.hour() - 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_acceleration_freezes_at_authoritative() {
        let mut sim = TimeSimulation::new(10.0, 0.0);
        for i in 0..100 {
            sim.set_authoritative(10.0 + i as f64 * 0.001, 0.0, false);
            let step = sim.step(1.0 / 60.0);
            assert_eq!(step.hour, sim.state().authoritative);
        }
    }

    #[test]
    fn test_paused_always_snaps() {
        let mut sim = TimeSimulation::new(12.0, 60.0).with_drift_threshold(5.0);
        sim.step(1.0);
        assert!(sim.hour() > 12.0);
        sim.set_authoritative(12.0, 60.0, true);
        let step = sim.step(1.0);
        assert!(step.snapped);
        assert_eq!(sim.hour(), 12.0);
    }

    #[test]
    fn test_drift_snaps_within_one_frame_of_crossing() {
        let threshold = DEFAULT_DRIFT_THRESHOLD_HOURS;
        let mut sim = TimeSimulation::new(6.0, 60.0);
        let dt = 1.0 / 60.0;
        let mut snaps = 0;

        for _ in 0..1000 {
            let step = sim.step(dt);
            assert!((0.0..HOURS_PER_DAY).contains(&step.hour));
            let drift = hour_distance(step.predicted, 6.0);
            // Every frame whose prediction crosses the threshold snaps, and no other does.
            assert_eq!(step.snapped, drift > threshold);
            if step.snapped {
                snaps += 1;
                assert_eq!(step.hour, 6.0);
            } else {
                assert!(hour_distance(step.hour, 6.0) <= threshold);
            }
        }
        // One simulated minute per real second drifts 0.1h in ~360 frames.
        assert!(snaps >= 2, "expected periodic snaps, got {snaps}");
    }

    #[test]
    fn test_smooth_time_wraps_past_midnight() {
        let mut sim = TimeSimulation::new(23.99, 3600.0).with_drift_threshold(1.0);
        sim.step(0.05);
        let h = sim.hour();
        assert!((0.0..HOURS_PER_DAY).contains(&h));
        assert!((h - 0.04).abs() < 1e-9, "got {h}");
    }

    #[test]
    fn test_negative_acceleration_wraps_backwards() {
        let mut sim = TimeSimulation::new(0.02, -3600.0).with_drift_threshold(1.0);
        sim.step(0.05);
        assert!((sim.hour() - 23.97).abs() < 1e-9);
    }

    #[test]
    fn test_time_jump_snaps_immediately() {
        let mut sim = TimeSimulation::new(8.0, 60.0);
        sim.step(0.016);
        sim.set_authoritative(20.0, 60.0, false);
        let step = sim.step(0.016);
        assert!(step.snapped);
        assert_eq!(sim.hour(), 20.0);
    }
}
