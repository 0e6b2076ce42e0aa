//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Globe generation settings.
    pub globe: GlobeConfig,
    /// Demo pick ray settings.
    pub pick: PickConfig,
    /// Logging and diagnostics.
    pub debug: DebugConfig,
}

/// Globe generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobeConfig {
    /// Segments per icosahedron edge. Tile count is `10·n² + 2`.
    pub subdivisions: u32,
    /// Noise and cap-mode seed.
    pub seed: u32,
    /// Probability (0.0 - 1.0) that a rock tile gets a separate raised cap.
    pub separate_cap_chance: f64,
}

/// Where the demo casts its pick ray from. The ray always aims at the globe center.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PickConfig {
    /// Camera position in globe units.
    pub camera_position: [f32; 3],
}

/// Logging and diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter (e.g., "debug", "info,hexglobe_mesh=trace").
    pub log_level: String,
    /// Also write JSON logs to this directory in debug builds.
    pub log_dir: Option<PathBuf>,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            subdivisions: 25,
            seed: 0,
            separate_cap_chance: 0.5,
        }
    }
}

impl Default for PickConfig {
    fn default() -> Self {
        Self {
            camera_position: [0.0, 0.0, 14.0],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

/// Platform config directory for hexglobe, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hexglobe"))
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
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
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }

    /// Re-read the file; returns `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject values that parse but cannot drive generation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.globe.subdivisions == 0 {
            return Err(ConfigError::Invalid {
                field: "globe.subdivisions",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.globe.separate_cap_chance) {
            return Err(ConfigError::Invalid {
                field: "globe.separate_cap_chance",
                reason: format!("{} is outside [0, 1]", self.globe.separate_cap_chance),
            });
        }
        if self.pick.camera_position.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "pick.camera_position",
                reason: "coordinates must be finite".to_string(),
            });
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
