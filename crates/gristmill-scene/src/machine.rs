//! Machine descriptors supplied by the simulation layer.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Stable identifier of a machine, as assigned by the simulation layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MachineId(String);

impl MachineId {
    /// Wrap a simulation-side identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MachineId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Operating status reported for a machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineStatus {
    /// Producing at nominal speed.
    #[default]
    Running,
    /// Powered but not producing.
    Idle,
    /// Producing with a degraded reading.
    Warning,
    /// Producing, close to a forced stop.
    Critical,
    /// Powered down or under maintenance.
    Offline,
}

impl MachineStatus {
    /// Multiplier applied to animated motion (roller spin, sieve gyration).
    pub fn speed_factor(self) -> f32 {
        match self {
            MachineStatus::Running => 1.0,
            MachineStatus::Warning => 0.7,
            MachineStatus::Critical => 0.3,
            MachineStatus::Idle | MachineStatus::Offline => 0.0,
        }
    }

    /// Whether any moving part should be animated at all.
    pub fn is_operating(self) -> bool {
        self.speed_factor() > 0.0
    }
}

/// Live metrics bag for one machine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineMetrics {
    /// Load or fill level in percent, nominally `[0, 100]`.
    pub load_percent: f32,
    /// Vibration amplitude in mm/s RMS.
    pub vibration: f32,
    /// Main shaft speed in revolutions per minute.
    pub rpm: f32,
}

impl Default for MachineMetrics {
    fn default() -> Self {
        Self {
            load_percent: 0.0,
            vibration: 0.0,
            rpm: 0.0,
        }
    }
}

impl MachineMetrics {
    /// Load as a fraction clamped to `[0, 1]`.
    pub fn load_fraction(&self) -> f32 {
        (self.load_percent / 100.0).clamp(0.0, 1.0)
    }
}

/// One machine as described by the simulation layer.
///
/// The render core never owns or mutates these; it re-reads the ordered
/// slice every frame and treats the slice index as the instance index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineDescriptor {
    /// Stable identifier.
    pub id: MachineId,
    /// World-space position of the machine's footprint center.
    pub position: Vec3,
    /// Yaw about +Y in radians.
    pub rotation: f32,
    /// Current operating status.
    pub status: MachineStatus,
    /// Current metrics.
    pub metrics: MachineMetrics,
}

impl MachineDescriptor {
    /// Create a running machine with empty metrics.
    pub fn new(id: impl Into<String>, position: Vec3, rotation: f32) -> Self {
        Self {
            id: MachineId::new(id),
            position,
            rotation,
            status: MachineStatus::Running,
            metrics: MachineMetrics::default(),
        }
    }

    /// Builder-style status override.
    pub fn with_status(mut self, status: MachineStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder-style metrics override.
    pub fn with_metrics(mut self, metrics: MachineMetrics) -> Self {
        self.metrics = metrics;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_statuses_do_not_animate() {
        assert!(!MachineStatus::Idle.is_operating());
        assert!(!MachineStatus::Offline.is_operating());
        assert!(MachineStatus::Running.is_operating());
        assert!(MachineStatus::Critical.is_operating());
    }

    #[test]
    fn test_speed_factor_degrades_with_severity() {
        let running = MachineStatus::Running.speed_factor();
        let warning = MachineStatus::Warning.speed_factor();
        let critical = MachineStatus::Critical.speed_factor();
        assert!(running > warning && warning > critical && critical > 0.0);
    }

    #[test]
    fn test_load_fraction_clamps() {
        let mut m = MachineMetrics::default();
        m.load_percent = 140.0;
        assert_eq!(m.load_fraction(), 1.0);
        m.load_percent = -5.0;
        assert_eq!(m.load_fraction(), 0.0);
        m.load_percent = 25.0;
        assert!((m.load_fraction() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_descriptor_builders() {
        let m = MachineDescriptor::new("RM-01", Vec3::new(1.0, 0.0, 2.0), 0.5)
            .with_status(MachineStatus::Warning)
            .with_metrics(MachineMetrics {
                load_percent: 50.0,
                vibration: 2.0,
                rpm: 600.0,
            });
        assert_eq!(m.id.as_str(), "RM-01");
        assert_eq!(m.status, MachineStatus::Warning);
        assert_eq!(m.metrics.rpm, 600.0);
    }

    #[test]
    fn test_descriptor_ron_roundtrip() {
        let m = MachineDescriptor::new("SILO-2", Vec3::new(4.0, 0.0, -3.0), 1.0);
        let text = ron::to_string(&m).unwrap();
        let back: MachineDescriptor = ron::from_str(&text).unwrap();
        assert_eq!(m, back);
    }
}
