//! Environment enumerations: render quality tier and weather.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Render quality tier selected by the user or by an adaptive governor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityTier {
    /// Coarsest geometry; non-essential animation is skipped.
    Low,
    /// Balanced default.
    #[default]
    Medium,
    /// Full geometric detail.
    High,
}

impl QualityTier {
    /// Every tier, lowest first.
    pub const ALL: [QualityTier; 3] = [QualityTier::Low, QualityTier::Medium, QualityTier::High];

    /// Whether this is the lowest tier.
    pub fn is_lowest(self) -> bool {
        self == QualityTier::Low
    }

    /// Lowercase name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(QualityTier::Low),
            "medium" | "med" => Ok(QualityTier::Medium),
            "high" => Ok(QualityTier::High),
            other => Err(format!("unknown quality tier '{other}'")),
        }
    }
}

/// Weather reported by the simulation layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Rain,
    Snow,
    Storm,
}

impl Weather {
    /// Cloud density fed to the sky dome shader, in `[0, 1]`.
    pub fn cloud_density(self) -> f32 {
        match self {
            Weather::Clear => 0.1,
            Weather::PartlyCloudy => 0.35,
            Weather::Fog => 0.6,
            Weather::Overcast => 0.7,
            Weather::Snow => 0.75,
            Weather::Rain => 0.85,
            Weather::Storm => 1.0,
        }
    }
}
