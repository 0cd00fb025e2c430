//! Shader parameter blocks for the animated environment.
//!
//! Each block is owned by the scene node that draws with it and mutated in
//! place by the animation scheduler. Layouts follow WGSL uniform rules, so
//! every block is a multiple of 16 bytes and vectors are padded to `vec4`.

use bytemuck::{Pod, Zeroable};
use static_assertions::assert_eq_size;

/// Sky dome gradient, celestial directions and cloud drift.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SkyDomeParams {
    pub top_color: [f32; 4],
    pub horizon_color: [f32; 4],
    /// xyz = direction towards the sun, w = sun intensity.
    pub sun_direction: [f32; 4],
    /// xyz = direction towards the moon, w = star visibility.
    pub moon_direction: [f32; 4],
    pub cloud_offset: f32,
    pub cloud_density: f32,
    pub time: f32,
    pub _padding: f32,
}

/// Night-sky star layer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct StarfieldParams {
    pub visibility: f32,
    /// Per-layer brightness multiplier after twinkle, `[0, 1]`.
    pub twinkle: f32,
    pub time: f32,
    pub _padding: f32,
}

/// Window lighting on building facades.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FacadeParams {
    pub window_color: [f32; 4],
    pub glow: f32,
    /// Fraction of windows lit, `[0, 1]`.
    pub lit_fraction: f32,
    pub _padding: [f32; 2],
}

/// A blinking or steady point light in the distant city.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CityLightParams {
    pub color: [f32; 4],
    pub intensity: f32,
    /// Non-zero when the light is on this frame.
    pub visible: u32,
    pub _padding: [f32; 2],
}

/// Distant terrain colour blending.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainLayerParams {
    pub tint: [f32; 4],
    /// Blend weight between the base colour and the sky tint.
    pub blend: f32,
    pub ambient: f32,
    pub _padding: [f32; 2],
}

/// Animated water plane.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct WaterSurfaceParams {
    pub tint: [f32; 4],
    pub wave_time: f32,
    pub wave_amplitude: f32,
    pub sun_glint: f32,
    pub _padding: f32,
}

/// Sun or moon key light.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct DirectionalLightParams {
    /// xyz = direction the light travels (from the light), w unused.
    pub direction: [f32; 4],
    pub color: [f32; 4],
    pub intensity: f32,
    pub ambient_intensity: f32,
    pub _padding: [f32; 2],
}

assert_eq_size!(SkyDomeParams, [u8; 80]);
assert_eq_size!(StarfieldParams, [u8; 16]);
assert_eq_size!(FacadeParams, [u8; 32]);
assert_eq_size!(CityLightParams, [u8; 32]);
assert_eq_size!(TerrainLayerParams, [u8; 32]);
assert_eq_size!(WaterSurfaceParams, [u8; 32]);
assert_eq_size!(DirectionalLightParams, [u8; 48]);

impl Default for SkyDomeParams {
    fn default() -> Self {
        Self {
            top_color: [0.2, 0.4, 0.8, 1.0],
            horizon_color: [0.7, 0.8, 0.9, 1.0],
            sun_direction: [0.0, 1.0, 0.0, 1.0],
            moon_direction: [0.0, -1.0, 0.0, 0.0],
            cloud_offset: 0.0,
            cloud_density: 0.1,
            time: 0.0,
            _padding: 0.0,
        }
    }
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            visibility: 0.0,
            twinkle: 1.0,
            time: 0.0,
            _padding: 0.0,
        }
    }
}

impl Default for FacadeParams {
    fn default() -> Self {
        Self {
            window_color: [1.0, 0.85, 0.55, 1.0],
            glow: 0.0,
            lit_fraction: 0.0,
            _padding: [0.0; 2],
        }
    }
}

impl Default for CityLightParams {
    fn default() -> Self {
        Self {
            color: [1.0, 0.9, 0.7, 1.0],
            intensity: 0.0,
            visible: 0,
            _padding: [0.0; 2],
        }
    }
}

impl Default for TerrainLayerParams {
    fn default() -> Self {
        Self {
            tint: [1.0; 4],
            blend: 0.0,
            ambient: 1.0,
            _padding: [0.0; 2],
        }
    }
}

impl Default for WaterSurfaceParams {
    fn default() -> Self {
        Self {
            tint: [0.2, 0.35, 0.45, 1.0],
            wave_time: 0.0,
            wave_amplitude: 0.05,
            sun_glint: 0.0,
            _padding: 0.0,
        }
    }
}

impl Default for DirectionalLightParams {
    fn default() -> Self {
        Self {
            direction: [0.0, -1.0, 0.0, 0.0],
            color: [1.0; 4],
            intensity: 1.0,
            ambient_intensity: 0.2,
            _padding: [0.0; 2],
        }
    }
}
