//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use biomer_format::Hemisphere;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";
const APP_NAME: &str = "biomer";

/// Top-level tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub debug: DebugConfig,
    /// Locations of auxiliary files.
    pub paths: PathsConfig,
    /// Editing behavior.
    pub edit: EditConfig,
    /// Bitmap export settings.
    pub render: RenderConfig,
}

/// Debug/logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level filter (e.g., "debug", "info", "biomer_format=trace").
    pub log_level: String,
    /// Also write JSON logs to the log directory in debug builds.
    pub log_to_file: bool,
}

/// File locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// RON biome catalog used to resolve editor ids to form ids.
    pub catalog: Option<PathBuf>,
    /// Directory for exported images. Defaults to the current directory.
    pub output_dir: Option<PathBuf>,
}

/// Editing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditConfig {
    /// Copy the original file to `<name>.bak` before overwriting it in place.
    pub backup_on_save: bool,
    /// Plugin names to protect in addition to the base-game list.
    pub extra_protected_plugins: Vec<String>,
}

/// Bitmap export configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Integer upscale factor applied to exported images (1 = one pixel per cell).
    pub scale: u32,
    /// Hemisphere used when a command does not name one.
    pub default_hemisphere: Hemisphere,
    /// Paint values without a palette color (biome indices past the table,
    /// unknown resource bytes) magenta instead of failing the export.
    pub highlight_unmapped: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            backup_on_save: true,
            extra_protected_plugins: Vec::new(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 1,
            default_hemisphere: Hemisphere::North,
            highlight_unmapped: true,
        }
    }
}

/// Platform configuration directory for Biomer (`<config dir>/biomer`).
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join(APP_NAME))
}

// --- Load / Save / Reload ---

impl Config {
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

    /// Re-read the file: returns `Some(new_config)` if it changed, `None` otherwise.
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

    /// Directory exported images are written to.
    pub fn output_dir(&self) -> PathBuf {
        self.paths
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
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
        assert!(ron_str.contains("log_level: \"info\""));
        assert!(ron_str.contains("backup_on_save: true"));
        assert!(ron_str.contains("default_hemisphere: north"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.render.default_hemisphere = Hemisphere::South;
        config.paths.catalog = Some(PathBuf::from("biomes.ron"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(debug: (log_level: \"warn\"))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.debug.log_level, "warn");
        assert_eq!(config.edit, EditConfig::default());
        assert_eq!(config.render.scale, 1);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.edit.backup_on_save = false;
        config.edit.extra_protected_plugins = vec!["MyMaster.esm".to_string()];
        config.render.scale = 4;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("nested");
        let config = Config::load_or_create(&config_dir).unwrap();
        assert_eq!(config, Config::default());
        assert!(config_dir.join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.debug.log_level = "trace".to_string();
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.debug.log_level), Some("trace".to_string()));
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

    #[test]
    fn test_output_dir_default() {
        let mut config = Config::default();
        assert_eq!(config.output_dir(), PathBuf::from("."));
        config.paths.output_dir = Some(PathBuf::from("/tmp/out"));
        assert_eq!(config.output_dir(), PathBuf::from("/tmp/out"));
    }
}
