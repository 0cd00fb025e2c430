//! Per-category update functions.
//!
//! Each function overwrites one parameter block from the frame context and
//! the entity's own parameters. None of them allocate.

use std::f64::consts::TAU;

use glam::Vec3;
use gristmill_render::{
    CityLightParams, DirectionalLightParams, FacadeParams, SkyDomeParams, StarfieldParams,
    TerrainLayerParams, WaterSurfaceParams,
};
use gristmill_time::{Lerp, Rgb8};

use crate::descriptor::{BlinkPattern, LightSource};
use crate::frame::FrameContext;

/// Glow below which city lights stay off.
pub const CITY_LIGHT_GLOW_THRESHOLD: f32 = 0.05;

const MOONLIGHT: [f32; 4] = [0.62, 0.70, 0.92, 1.0];
const MOONLIGHT_INTENSITY: f32 = 0.15;
const BASE_WAVE_AMPLITUDE: f32 = 0.05;

fn rgba(color: Rgb8) -> [f32; 4] {
    let [r, g, b] = color.to_unit();
    [r, g, b, 1.0]
}

fn with_w(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

pub fn sky_dome(params: &mut SkyDomeParams, frame: &FrameContext, cloud_speed: f32) {
    let palette = &frame.palette;
    params.top_color = rgba(palette.sky_top);
    params.horizon_color = rgba(palette.sky_horizon);
    params.sun_direction = with_w(frame.sun_direction, palette.sun_intensity);
    params.moon_direction = with_w(frame.moon_direction, palette.star_visibility);
    params.cloud_offset = (frame.elapsed * f64::from(cloud_speed)).rem_euclid(1.0) as f32;
    params.cloud_density = frame.cloud_density;
    params.time = frame.elapsed as f32;
}

pub fn starfield(params: &mut StarfieldParams, frame: &FrameContext, twinkle_phase: f32) {
    let wave = (frame.elapsed * 3.0 + f64::from(twinkle_phase) * TAU).sin() as f32;
    params.visibility = frame.palette.star_visibility * (1.0 - frame.cloud_density);
    params.twinkle = 0.75 + 0.25 * wave;
    params.time = frame.elapsed as f32;
}

pub fn building_facade(
    params: &mut FacadeParams,
    frame: &FrameContext,
    window_color: Rgb8,
    lit_fraction: f32,
) {
    let glow = frame.palette.window_glow.clamp(0.0, 1.0);
    params.window_color = rgba(window_color);
    params.glow = glow;
    params.lit_fraction = lit_fraction * glow;
}

pub fn city_light(
    params: &mut CityLightParams,
    frame: &FrameContext,
    base_color: Rgb8,
    blink: &BlinkPattern,
    active: bool,
) {
    let glow = frame.palette.window_glow;
    let on = active && glow > CITY_LIGHT_GLOW_THRESHOLD && blink.is_on(frame.elapsed);
    params.color = rgba(base_color);
    params.visible = u32::from(on);
    params.intensity = if on { glow } else { 0.0 };
}

pub fn terrain_layer(
    params: &mut TerrainLayerParams,
    frame: &FrameContext,
    base_color: Rgb8,
    sky_blend: f32,
) {
    let tint = base_color.lerp(&frame.palette.sky_horizon, sky_blend);
    params.tint = rgba(tint);
    params.blend = sky_blend;
    params.ambient = frame.palette.ambient_intensity;
}

pub fn water_surface(params: &mut WaterSurfaceParams, frame: &FrameContext, wave_speed: f32) {
    params.tint = rgba(frame.palette.sky_horizon);
    params.wave_time = (frame.elapsed * f64::from(wave_speed)) as f32;
    params.wave_amplitude = BASE_WAVE_AMPLITUDE * (1.0 + frame.cloud_density);
    params.sun_glint = frame.palette.sun_intensity * frame.sun_direction.y.max(0.0);
}

pub fn directional_light(
    params: &mut DirectionalLightParams,
    frame: &FrameContext,
    source: LightSource,
) {
    let palette = &frame.palette;
    match source {
        LightSource::Sun => {
            params.direction = with_w(-frame.sun_direction, 0.0);
            params.color = rgba(palette.sun_color);
            params.intensity = palette.sun_intensity * (1.0 - 0.5 * frame.cloud_density);
        }
        LightSource::Moon => {
            params.direction = with_w(-frame.moon_direction, 0.0);
            params.color = MOONLIGHT;
            params.intensity = MOONLIGHT_INTENSITY * palette.star_visibility;
        }
    }
    params.ambient_intensity = palette.ambient_intensity;
}
