use std::fmt;

use gristmill_time::UpdateTier;

/// Animated environment categories, one registry map each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnimationCategory {
    SkyDome,
    Starfield,
    BuildingFacade,
    CityLights,
    TerrainLayer,
    WaterSurface,
    DirectionalLighting,
}

impl AnimationCategory {
    /// Every category in scheduling order.
    pub const ALL: [AnimationCategory; 7] = [
        AnimationCategory::SkyDome,
        AnimationCategory::Starfield,
        AnimationCategory::BuildingFacade,
        AnimationCategory::CityLights,
        AnimationCategory::TerrainLayer,
        AnimationCategory::WaterSurface,
        AnimationCategory::DirectionalLighting,
    ];

    /// Position in [`ALL`](Self::ALL).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Default update frequency.
    pub fn default_tier(self) -> UpdateTier {
        match self {
            AnimationCategory::SkyDome
            | AnimationCategory::WaterSurface
            | AnimationCategory::DirectionalLighting => UpdateTier::Smooth,
            AnimationCategory::Starfield | AnimationCategory::CityLights => UpdateTier::Medium,
            AnimationCategory::BuildingFacade | AnimationCategory::TerrainLayer => {
                UpdateTier::Ambient
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnimationCategory::SkyDome => "sky dome",
            AnimationCategory::Starfield => "starfield",
            AnimationCategory::BuildingFacade => "building facade",
            AnimationCategory::CityLights => "city lights",
            AnimationCategory::TerrainLayer => "terrain layer",
            AnimationCategory::WaterSurface => "water surface",
            AnimationCategory::DirectionalLighting => "directional lighting",
        }
    }
}

impl fmt::Display for AnimationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
