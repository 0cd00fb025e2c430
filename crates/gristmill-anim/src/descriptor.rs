//! Registry entries: weak handles to render state plus per-entity parameters.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gristmill_render::{
    CityLightParams, DirectionalLightParams, FacadeParams, SkyDomeParams, StarfieldParams,
    TerrainLayerParams, WaterSurfaceParams,
};
use gristmill_time::Rgb8;

use crate::category::AnimationCategory;

/// On/off cycle of a blinking light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlinkPattern {
    /// Cycle length in seconds. Zero or negative means steady.
    pub period: f32,
    /// Fraction of the cycle spent on, `[0, 1]`.
    pub duty: f32,
    /// Offset into the cycle, in cycles.
    pub phase: f32,
}

impl BlinkPattern {
    /// Always on.
    pub const STEADY: BlinkPattern = BlinkPattern {
        period: 0.0,
        duty: 1.0,
        phase: 0.0,
    };

    pub fn new(period: f32, duty: f32, phase: f32) -> Self {
        Self {
            period,
            duty: duty.clamp(0.0, 1.0),
            phase,
        }
    }

    /// Whether the light is lit `elapsed` seconds into the run.
    pub fn is_on(&self, elapsed: f64) -> bool {
        if self.period <= 0.0 {
            return self.duty > 0.0;
        }
        let cycle = (elapsed / f64::from(self.period) + f64::from(self.phase)).rem_euclid(1.0);
        cycle < f64::from(self.duty)
    }
}

/// Which body a directional light follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightSource {
    Sun,
    Moon,
}

/// One registered animated entity.
///
/// Each variant holds a [`Weak`] reference to a block owned by its scene
/// node. A descriptor whose owner has been dropped is stale and skipped.
#[derive(Clone, Debug)]
pub enum AnimationDescriptor {
    SkyDome {
        dome: Weak<RefCell<SkyDomeParams>>,
        /// Cloud texture scroll, in texture widths per second.
        cloud_speed: f32,
    },
    Starfield {
        stars: Weak<RefCell<StarfieldParams>>,
        twinkle_phase: f32,
    },
    BuildingFacade {
        facade: Weak<RefCell<FacadeParams>>,
        window_color: Rgb8,
        /// Fraction of windows lit at full night.
        lit_fraction: f32,
    },
    CityLights {
        light: Weak<RefCell<CityLightParams>>,
        base_color: Rgb8,
        blink: BlinkPattern,
        active: bool,
    },
    TerrainLayer {
        layer: Weak<RefCell<TerrainLayerParams>>,
        base_color: Rgb8,
        /// How far the layer is tinted toward the horizon colour, `[0, 1]`.
        sky_blend: f32,
    },
    WaterSurface {
        water: Weak<RefCell<WaterSurfaceParams>>,
        wave_speed: f32,
    },
    DirectionalLighting {
        light: Weak<RefCell<DirectionalLightParams>>,
        source: LightSource,
    },
}

impl AnimationDescriptor {
    pub fn sky_dome(dome: &Rc<RefCell<SkyDomeParams>>, cloud_speed: f32) -> Self {
        Self::SkyDome {
            dome: Rc::downgrade(dome),
            cloud_speed,
        }
    }

    pub fn starfield(stars: &Rc<RefCell<StarfieldParams>>, twinkle_phase: f32) -> Self {
        Self::Starfield {
            stars: Rc::downgrade(stars),
            twinkle_phase,
        }
    }

    pub fn building_facade(
        facade: &Rc<RefCell<FacadeParams>>,
        window_color: Rgb8,
        lit_fraction: f32,
    ) -> Self {
        Self::BuildingFacade {
            facade: Rc::downgrade(facade),
            window_color,
            lit_fraction: lit_fraction.clamp(0.0, 1.0),
        }
    }

    pub fn city_light(
        light: &Rc<RefCell<CityLightParams>>,
        base_color: Rgb8,
        blink: BlinkPattern,
    ) -> Self {
        Self::CityLights {
            light: Rc::downgrade(light),
            base_color,
            blink,
            active: true,
        }
    }

    pub fn terrain_layer(
        layer: &Rc<RefCell<TerrainLayerParams>>,
        base_color: Rgb8,
        sky_blend: f32,
    ) -> Self {
        Self::TerrainLayer {
            layer: Rc::downgrade(layer),
            base_color,
            sky_blend: sky_blend.clamp(0.0, 1.0),
        }
    }

    pub fn water_surface(water: &Rc<RefCell<WaterSurfaceParams>>, wave_speed: f32) -> Self {
        Self::WaterSurface {
            water: Rc::downgrade(water),
            wave_speed,
        }
    }

    pub fn directional_light(
        light: &Rc<RefCell<DirectionalLightParams>>,
        source: LightSource,
    ) -> Self {
        Self::DirectionalLighting {
            light: Rc::downgrade(light),
            source,
        }
    }

    /// Category this variant belongs to.
    pub fn category(&self) -> AnimationCategory {
        match self {
            Self::SkyDome { .. } => AnimationCategory::SkyDome,
            Self::Starfield { .. } => AnimationCategory::Starfield,
            Self::BuildingFacade { .. } => AnimationCategory::BuildingFacade,
            Self::CityLights { .. } => AnimationCategory::CityLights,
            Self::TerrainLayer { .. } => AnimationCategory::TerrainLayer,
            Self::WaterSurface { .. } => AnimationCategory::WaterSurface,
            Self::DirectionalLighting { .. } => AnimationCategory::DirectionalLighting,
        }
    }

    /// Whether the referenced block is still owned by a scene node.
    pub fn is_live(&self) -> bool {
        match self {
            Self::SkyDome { dome, .. } => dome.strong_count() > 0,
            Self::Starfield { stars, .. } => stars.strong_count() > 0,
            Self::BuildingFacade { facade, .. } => facade.strong_count() > 0,
            Self::CityLights { light, .. } => light.strong_count() > 0,
            Self::TerrainLayer { layer, .. } => layer.strong_count() > 0,
            Self::WaterSurface { water, .. } => water.strong_count() > 0,
            Self::DirectionalLighting { light, .. } => light.strong_count() > 0,
        }
    }
}
