//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use gristmill_scene::QualityTier;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Rendering settings.
    pub render: RenderConfig,
    /// Update frequencies of the animation categories and machine classes.
    pub schedule: ScheduleConfig,
    /// Simulated time settings.
    pub time: TimeConfig,
    /// Headless demo settings.
    pub demo: DemoConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Quality tier at startup.
    pub quality: QualityTier,
    /// Cull radius for storage silos, in world units.
    pub silo_cull_radius: f32,
    /// Cull radius for roller mills.
    pub mill_cull_radius: f32,
    /// Cull radius for plan sifters.
    pub sifter_cull_radius: f32,
    /// Cull radius for packing stations.
    pub packer_cull_radius: f32,
    /// Whether clicks on culled (zero-scaled) instances still select.
    pub select_culled: bool,
    /// Apply per-instance colour variation.
    pub color_variation: bool,
}

/// Frame divisors: 1 = every frame, 4 = every fourth frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    pub sky_dome: u32,
    pub starfield: u32,
    pub building_facade: u32,
    pub city_lights: u32,
    pub terrain_layer: u32,
    pub water_surface: u32,
    pub directional_lighting: u32,
    pub silos: u32,
    pub mills: u32,
    pub sifters: u32,
    pub packers: u32,
}

/// Simulated time configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimeConfig {
    /// Hour of day at startup, `[0, 24)`.
    pub start_hour: f64,
    /// Simulated seconds per real second.
    pub acceleration: f64,
    /// Maximum divergence between smooth and authoritative time, in hours.
    pub drift_threshold_hours: f64,
}

/// Headless demo configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of storage silos.
    pub silos: u32,
    /// Number of roller mills.
    pub mills: u32,
    /// Number of plan sifters.
    pub sifters: u32,
    /// Number of packing stations.
    pub packers: u32,
    /// Frames to render before exiting.
    pub frames: u32,
    /// Simulated display refresh rate.
    pub refresh_hz: f64,
    /// Minimum interval between authoritative time publications, in ms.
    pub publish_interval_ms: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to the log directory (debug builds only).
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            quality: QualityTier::Medium,
            silo_cull_radius: 220.0,
            mill_cull_radius: 120.0,
            sifter_cull_radius: 90.0,
            packer_cull_radius: 90.0,
            select_culled: false,
            color_variation: true,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            sky_dome: 1,
            starfield: 2,
            building_facade: 4,
            city_lights: 2,
            terrain_layer: 4,
            water_surface: 1,
            directional_lighting: 1,
            silos: 4,
            mills: 1,
            sifters: 1,
            packers: 2,
        }
    }
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            start_hour: 6.0,
            acceleration: 60.0,
            drift_threshold_hours: 0.1,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            silos: 12,
            mills: 24,
            sifters: 16,
            packers: 8,
            frames: 600,
            refresh_hz: 60.0,
            publish_interval_ms: 500,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Per-user config directory, e.g. `~/.config/gristmill` on Linux.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("gristmill"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("quality: Medium"));
        assert!(ron_str.contains("building_facade: 4"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.render.quality = QualityTier::High;
        config.schedule.mills = 2;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(render: (), time: (acceleration: 120.0))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.schedule, ScheduleConfig::default());
        assert_eq!(config.time.acceleration, 120.0);
        assert_eq!(config.time.start_hour, 6.0);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_default_divisors_match_update_tiers() {
        let schedule = ScheduleConfig::default();
        // Motion-critical every frame, colour state at quarter rate, twinkle at half.
        assert_eq!(schedule.sky_dome, 1);
        assert_eq!(schedule.water_surface, 1);
        assert_eq!(schedule.building_facade, 4);
        assert_eq!(schedule.terrain_layer, 4);
        assert_eq!(schedule.starfield, 2);
        assert_eq!(schedule.city_lights, 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.render.mill_cull_radius = 75.0;
        config.demo.frames = 10;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.render.quality = QualityTier::Low;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().render.quality, QualityTier::Low);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
