// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! button and indicator preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use loading_button::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Pick the flip-book indicator
//! config.indicator.indicator_type = Some(1);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use iced::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "LoadingButton";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub loading_secs: Option<u64>,
    #[serde(default)]
    pub indicator: IndicatorConfig,
}

impl Config {
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }

    #[must_use]
    pub fn loading_duration(&self) -> Duration {
        Duration::from_secs(self.loading_secs.unwrap_or(DEFAULT_LOADING_SECS))
    }
}

/// Options recognized by the loading button. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// 0 = arc spinner, 1 = frame animation, 2 = image (optionally rotated).
    #[serde(default)]
    pub indicator_type: Option<i64>,
    #[serde(default)]
    pub padding: Option<f32>,
    /// Hex color such as `"#808080"`.
    #[serde(default)]
    pub arc_color: Option<String>,
    #[serde(default)]
    pub arc_stroke_width: Option<f32>,
    #[serde(default)]
    pub auto_rotate: Option<bool>,
    /// Image file for the image indicator; the built-in loader graphic is
    /// used when absent.
    #[serde(default)]
    pub image_source: Option<PathBuf>,
    #[serde(default)]
    pub start_on_build: Option<bool>,
    /// Time per frame of the built-in flip-book, and for frames of an
    /// animated `image_source` that carry no delay of their own.
    #[serde(default)]
    pub frame_duration_ms: Option<u64>,
    #[serde(default)]
    pub frame_one_shot: Option<bool>,
}

impl IndicatorConfig {
    #[must_use]
    pub fn indicator_type(&self) -> i64 {
        self.indicator_type.unwrap_or(DEFAULT_INDICATOR_TYPE)
    }

    #[must_use]
    pub fn padding(&self) -> f32 {
        self.padding.unwrap_or(DEFAULT_PADDING)
    }

    /// Parses the configured arc color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the value is not a hex color.
    pub fn arc_color(&self) -> Result<Color> {
        let raw = self.arc_color.as_deref().unwrap_or(DEFAULT_ARC_COLOR);
        raw.parse::<Color>()
            .map_err(|_| Error::Config(format!("invalid arc color: {raw}")))
    }

    #[must_use]
    pub fn arc_stroke_width(&self) -> f32 {
        self.arc_stroke_width.unwrap_or(DEFAULT_ARC_STROKE_WIDTH)
    }

    #[must_use]
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate.unwrap_or(DEFAULT_AUTO_ROTATE)
    }

    #[must_use]
    pub fn start_on_build(&self) -> bool {
        self.start_on_build.unwrap_or(DEFAULT_START_ON_BUILD)
    }

    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_duration_ms.unwrap_or(DEFAULT_FRAME_DURATION_MS))
    }

    #[must_use]
    pub fn frame_one_shot(&self) -> bool {
        self.frame_one_shot.unwrap_or(DEFAULT_FRAME_ONE_SHOT)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a config file. Malformed TOML falls back to defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring malformed config");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_indicator() {
        let config = Config {
            label: Some("Send".to_string()),
            loading_secs: Some(3),
            indicator: IndicatorConfig {
                indicator_type: Some(2),
                padding: Some(12.0),
                auto_rotate: Some(true),
                image_source: Some(PathBuf::from("/tmp/loader.png")),
                ..IndicatorConfig::default()
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn partial_indicator_table_keeps_other_defaults() {
        let loaded: Config = toml::from_str("[indicator]\npadding = 40.0\n").expect("valid toml");
        assert_eq!(loaded.indicator.padding(), 40.0);
        assert_eq!(loaded.indicator.indicator_type(), DEFAULT_INDICATOR_TYPE);
        assert_eq!(loaded.indicator.arc_stroke_width(), DEFAULT_ARC_STROKE_WIDTH);
        assert_eq!(loaded.label(), DEFAULT_LABEL);
    }

    #[test]
    fn default_indicator_values() {
        let indicator = IndicatorConfig::default();
        assert_eq!(indicator.padding(), 30.0);
        assert_eq!(indicator.arc_stroke_width(), 5.0);
        assert!(!indicator.auto_rotate());
        assert!(indicator.start_on_build());
        assert_eq!(indicator.frame_duration(), Duration::from_millis(100));
        assert!(!indicator.frame_one_shot());
        assert_eq!(
            indicator.arc_color().expect("default color parses"),
            Color::from_rgb8(0x88, 0x88, 0x88)
        );
    }

    #[test]
    fn arc_color_parses_configured_hex() {
        let indicator = IndicatorConfig {
            arc_color: Some("#ff0000".into()),
            ..IndicatorConfig::default()
        };
        assert_eq!(
            indicator.arc_color().expect("hex color parses"),
            Color::from_rgb8(0xff, 0x00, 0x00)
        );
    }

    #[test]
    fn invalid_arc_color_is_a_config_error() {
        let indicator = IndicatorConfig {
            arc_color: Some("grayish".into()),
            ..IndicatorConfig::default()
        };
        assert!(matches!(indicator.arc_color(), Err(Error::Config(_))));
    }

    #[test]
    fn load_from_path_reports_missing_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let err = load_from_path(&temp_dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
