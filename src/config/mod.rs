// SPDX-License-Identifier: MPL-2.0
//! This module handles notification defaults, including loading and saving
//! them to a `toasts.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use toast_queue::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.accent = Some("#1751C3".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_file = PathBuf::from("./temp_config_dir/toasts.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded.accent, Some("#1751C3".to_string()));
//! ```

pub mod defaults;

pub use defaults::*;

use crate::diagnostics::BufferCapacity;
use crate::error::{Error, Result};
use crate::notifications::{Animation, Brush};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "toasts.toml";
const APP_NAME: &str = "ToastQueue";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub accent: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub foreground: Option<String>,
    #[serde(default)]
    pub animates: Option<bool>,
    #[serde(default)]
    pub animation_in_secs: Option<f64>,
    #[serde(default)]
    pub animation_out_secs: Option<f64>,
    /// Dismiss every queued message after this many seconds.
    #[serde(default)]
    pub auto_dismiss_secs: Option<f64>,
    #[serde(default)]
    pub diagnostics_buffer_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accent: None,
            background: None,
            foreground: None,
            animates: Some(false),
            animation_in_secs: Some(DEFAULT_ANIMATION_IN_MS as f64 / 1000.0),
            animation_out_secs: Some(DEFAULT_ANIMATION_OUT_MS as f64 / 1000.0),
            auto_dismiss_secs: None,
            diagnostics_buffer_capacity: Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
        }
    }
}

impl Config {
    /// Checks every numeric field without building anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for negative, non-finite or
    /// out-of-range seconds.
    pub fn validate(&self) -> Result<()> {
        self.animation()?;
        self.auto_dismiss()?;
        Ok(())
    }

    /// Builds the animation settings new messages start with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a duration is unusable.
    pub fn animation(&self) -> Result<Animation> {
        let mut animation = Animation {
            enabled: self.animates.unwrap_or(false),
            ..Animation::default()
        };
        if let Some(secs) = self.animation_in_secs {
            animation.in_duration = secs_to_duration("animation_in_secs", secs, MAX_ANIMATION_SECS)?;
        }
        if let Some(secs) = self.animation_out_secs {
            animation.out_duration =
                secs_to_duration("animation_out_secs", secs, MAX_ANIMATION_SECS)?;
        }
        Ok(animation)
    }

    /// Returns the configured auto-dismiss delay, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the delay is unusable.
    pub fn auto_dismiss(&self) -> Result<Option<Duration>> {
        self.auto_dismiss_secs
            .map(|secs| secs_to_duration("auto_dismiss_secs", secs, MAX_AUTO_DISMISS_SECS))
            .transpose()
    }

    #[must_use]
    pub fn buffer_capacity(&self) -> BufferCapacity {
        self.diagnostics_buffer_capacity
            .map(BufferCapacity::new)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn accent_brush(&self) -> Option<Brush> {
        self.accent.as_deref().map(Brush::from)
    }

    #[must_use]
    pub fn background_brush(&self) -> Option<Brush> {
        self.background.as_deref().map(Brush::from)
    }

    #[must_use]
    pub fn foreground_brush(&self) -> Option<Brush> {
        self.foreground.as_deref().map(Brush::from)
    }
}

fn secs_to_duration(field: &str, secs: f64, max: f64) -> Result<Duration> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "{field} must be a finite, non-negative number of seconds (got {secs})"
        )));
    }
    if secs > max {
        return Err(Error::InvalidArgument(format!(
            "{field} must not exceed {max} seconds (got {secs})"
        )));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| Error::InvalidArgument(format!("{field}: {e}")))
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

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
