use glam::Vec3;
use gristmill_scene::Weather;
use gristmill_time::{SkyPalette, celestial_directions};

/// Everything an update function reads for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext {
    /// Smoothed simulated hour, `[0, 24)`.
    pub hour: f64,
    /// Render seconds since start.
    pub elapsed: f64,
    /// Day/night palette sampled at `hour`.
    pub palette: SkyPalette,
    pub sun_direction: Vec3,
    pub moon_direction: Vec3,
    pub cloud_density: f32,
}

impl FrameContext {
    pub fn new(hour: f64, elapsed: f64, palette: SkyPalette, weather: Weather) -> Self {
        let (sun_direction, moon_direction) = celestial_directions(hour);
        Self {
            hour,
            elapsed,
            palette,
            sun_direction,
            moon_direction,
            cloud_density: weather.cloud_density(),
        }
    }
}
