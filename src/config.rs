use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeConfig,
    pub sea: SeaConfig,
    pub sound: SoundConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub panel_color: String,
    pub display_background: String,
    pub display_text: String,
    pub button_color: String,
    pub button_hover_color: String,
    pub button_text: String,
    pub sea_color: String,
    pub font_size: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeaConfig {
    pub width: i32,
    pub height: i32,
    pub fish_count: usize,
    pub max_dolphins: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            panel_color: "#0099cc".to_string(),
            display_background: "#e0f7fa".to_string(),
            display_text: "#005577".to_string(),
            button_color: "#33ccff".to_string(),
            button_hover_color: "#66d9ff".to_string(),
            button_text: "#003366".to_string(),
            sea_color: "#b3e0ff".to_string(),
            font_size: 18,
        }
    }
}

impl Default for SeaConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 400,
            fish_count: 10,
            max_dolphins: 100,
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("dolphin.wav"),
        }
    }
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dolphin_calc")
            .join("config.toml")
    }

    /// Loads the user config, writing the defaults out on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            let default = Config::default();
            if let Err(e) = default.save_to(&path) {
                tracing::warn!(error = %e, "could not write default config");
            }
            return Ok(default);
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents = toml::to_string(self)?;
        fs::write(path, contents).map_err(io_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = Config::parse(
            r#"
            [sea]
            max_dolphins = 20

            [sound]
            enabled = false
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.sea.max_dolphins, 20);
        assert_eq!(config.sea.width, 300);
        assert!(!config.sound.enabled);
        assert_eq!(config.sound.path, PathBuf::from("dolphin.wav"));
        assert_eq!(config.theme, ThemeConfig::default());
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("").expect("valid toml"), Config::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(Config::parse("[sea]\nwidth = \"wide\"").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("dolphin_calc_test_{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");

        let mut config = Config::default();
        config.sea.fish_count = 4;
        config.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded, config);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("dolphin_calc_missing").join("none.toml");
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Io { .. })));
    }
}
