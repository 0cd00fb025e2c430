//! Day/night palette for the factory yard and the sun/moon path.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::keyframe::{Keyframe, KeyframeTable, Lerp, Rgb8};

/// Everything the sky, lighting and facade passes read from the time of day.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyPalette {
    /// Zenith colour of the sky dome.
    pub sky_top: Rgb8,
    /// Horizon colour of the sky dome, also used as fog colour.
    pub sky_horizon: Rgb8,
    /// Ambient fill colour.
    pub ambient: Rgb8,
    /// Directional (sun or moon) light colour.
    pub sun_color: Rgb8,
    /// Directional light intensity.
    pub sun_intensity: f32,
    /// Ambient light intensity.
    pub ambient_intensity: f32,
    /// Starfield opacity, `[0, 1]`.
    pub star_visibility: f32,
    /// Emissive strength of lit building windows, `[0, 1]`.
    pub window_glow: f32,
}

impl Lerp for SkyPalette {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            sky_top: self.sky_top.lerp(&other.sky_top, t),
            sky_horizon: self.sky_horizon.lerp(&other.sky_horizon, t),
            ambient: self.ambient.lerp(&other.ambient, t),
            sun_color: self.sun_color.lerp(&other.sun_color, t),
            sun_intensity: self.sun_intensity.lerp(&other.sun_intensity, t),
            ambient_intensity: self.ambient_intensity.lerp(&other.ambient_intensity, t),
            star_visibility: self.star_visibility.lerp(&other.star_visibility, t),
            window_glow: self.window_glow.lerp(&other.window_glow, t),
        }
    }
}

#[allow(clippy::too_many_arguments)]
const fn palette(
    sky_top: u32,
    sky_horizon: u32,
    ambient: u32,
    sun_color: u32,
    sun_intensity: f32,
    ambient_intensity: f32,
    star_visibility: f32,
    window_glow: f32,
) -> SkyPalette {
    SkyPalette {
        sky_top: Rgb8::from_hex(sky_top),
        sky_horizon: Rgb8::from_hex(sky_horizon),
        ambient: Rgb8::from_hex(ambient),
        sun_color: Rgb8::from_hex(sun_color),
        sun_intensity,
        ambient_intensity,
        star_visibility,
        window_glow,
    }
}

/// Built-in keyframes, strictly increasing in `[0, 24)`.
const DAY_CYCLE: [(f64, SkyPalette); 9] = [
    (0.0, palette(0x05070f, 0x0c1224, 0x1a2238, 0x8090c0, 0.08, 0.15, 1.0, 1.0)),
    (5.0, palette(0x0b1230, 0x2a2f52, 0x262c48, 0x9aa4d0, 0.10, 0.18, 0.8, 1.0)),
    (6.5, palette(0x3a5a9c, 0xf0a060, 0x806858, 0xffb070, 0.55, 0.35, 0.1, 0.6)),
    (8.0, palette(0x5c8fd6, 0xbcd4ee, 0x9aa8b8, 0xfff0d8, 0.90, 0.50, 0.0, 0.0)),
    (12.0, palette(0x4a86e0, 0xcfe3f7, 0xb0bccc, 0xfffaf0, 1.00, 0.60, 0.0, 0.0)),
    (17.0, palette(0x5480c8, 0xe8c89a, 0xa09888, 0xffe0b0, 0.85, 0.50, 0.0, 0.1)),
    (18.5, palette(0x2c3c78, 0xf08048, 0x705850, 0xff9050, 0.45, 0.30, 0.2, 0.7)),
    (20.0, palette(0x0e1638, 0x3a3050, 0x2a2c44, 0xa0a8d8, 0.15, 0.20, 0.7, 1.0)),
    (22.0, palette(0x070a18, 0x141a30, 0x1e2438, 0x8894c4, 0.10, 0.16, 1.0, 1.0)),
];

/// The factory's day/night cycle.
pub fn default_day_cycle() -> KeyframeTable<SkyPalette> {
    // The constant table is checked by `test_default_day_cycle_is_valid`.
    KeyframeTable::from_keyframes(
        DAY_CYCLE
            .iter()
            .map(|&(hour, value)| Keyframe { hour, value })
            .collect(),
    )
}

/// Unit directions toward the sun and the moon at `hour`.
///
/// The sun rises due east (+X) at 06:00, culminates at noon and sets due
/// west at 18:00 on a path tilted toward -Z. The moon sits opposite.
pub fn celestial_directions(hour: f64) -> (Vec3, Vec3) {
    let angle = ((hour - 6.0) / 24.0) as f32 * TAU;
    let sun = Vec3::new(angle.cos(), angle.sin(), -0.35).normalize();
    (sun, -sun)
}
