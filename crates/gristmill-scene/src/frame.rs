//! Per-frame input bundle read from the simulation layer.

use glam::Vec3;

use crate::{QualityTier, Weather};

/// Everything the render core reads from outside once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameInputs {
    /// Authoritative simulated hour of day, `[0, 24)`.
    pub authoritative_hour: f64,
    /// Simulated seconds per real second.
    pub acceleration: f64,
    /// Whether the simulation is paused.
    pub paused: bool,
    /// Current weather.
    pub weather: Weather,
    /// Current quality tier.
    pub quality: QualityTier,
    /// Whether the view is visible (window focused / tab shown).
    pub view_visible: bool,
    /// Camera position in world space.
    pub camera_position: Vec3,
}

impl Default for FrameInputs {
    fn default() -> Self {
        Self {
            authoritative_hour: 8.0,
            acceleration: 60.0,
            paused: false,
            weather: Weather::Clear,
            quality: QualityTier::Medium,
            view_visible: true,
            camera_position: Vec3::new(0.0, 12.0, 40.0),
        }
    }
}
