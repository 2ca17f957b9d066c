// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[zoom]` - Zoom step and bounds, optional clamp after zoom
//! - `[viewport]` - Fixed viewport size and hover grid
//! - `[export]` - Export format and target directory
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` or set `ICED_CROPPER_CONFIG_DIR`
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_cropper::config;
//!
//! let (config, warning) = config::load();
//! if let Some(key) = warning {
//!     eprintln!("settings.toml ignored: {key}");
//! }
//! println!("fixed viewport: {:?}", config.fixed_viewport());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::ui::ZoomConfig;
use crate::error::{Error, Result};
use crate::media::ExportFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Zoom settings handed to the viewer at construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoomSection {
    #[serde(default = "default_zoom_step")]
    pub step: f32,

    #[serde(default = "default_min_zoom")]
    pub min: f32,

    #[serde(default = "default_max_zoom")]
    pub max: f32,

    /// Re-clamp the pan offset after each zoom step.
    #[serde(default)]
    pub clamp_on_zoom: bool,
}

impl Default for ZoomSection {
    fn default() -> Self {
        Self {
            step: DEFAULT_ZOOM_STEP,
            min: DEFAULT_MIN_ZOOM,
            max: DEFAULT_MAX_ZOOM,
            clamp_on_zoom: false,
        }
    }
}

/// Viewport presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewportSection {
    /// Fixed viewport width; `None` fills the window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,

    /// Fixed viewport height; `None` fills the window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,

    #[serde(default = "default_show_grid")]
    pub show_grid: bool,
}

impl Default for ViewportSection {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            show_grid: DEFAULT_SHOW_GRID,
        }
    }
}

/// Crop export settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExportSection {
    #[serde(default)]
    pub format: ExportFormat,

    /// Target directory; `None` uses the platform download directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub zoom: ZoomSection,

    #[serde(default)]
    pub viewport: ViewportSection,

    #[serde(default)]
    pub export: ExportSection,
}

impl Config {
    /// Validated zoom configuration.
    ///
    /// Invalid bounds fall back to the defaults; the second element then
    /// carries the rejection reason.
    #[must_use]
    pub fn zoom_config(&self) -> (ZoomConfig, Option<String>) {
        match ZoomConfig::new(self.zoom.step, self.zoom.min, self.zoom.max) {
            Ok(config) => (config, None),
            Err(err) => {
                log::warn!("invalid zoom settings, using defaults: {err}");
                (ZoomConfig::default(), Some(err.to_string()))
            }
        }
    }

    /// Fixed viewport side, if configured and within bounds.
    #[must_use]
    pub fn fixed_viewport(&self) -> Option<(f32, f32)> {
        let width = sanitize_side(self.viewport.width?)?;
        let height = sanitize_side(self.viewport.height?)?;
        Some((width, height))
    }
}

fn sanitize_side(value: f32) -> Option<f32> {
    (value.is_finite() && (MIN_VIEWPORT_SIDE..=MAX_VIEWPORT_SIDE).contains(&value))
        .then_some(value.round())
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_zoom_step() -> f32 {
    DEFAULT_ZOOM_STEP
}

fn default_min_zoom() -> f32 {
    DEFAULT_MIN_ZOOM
}

fn default_max_zoom() -> f32 {
    DEFAULT_MAX_ZOOM
}

fn default_show_grid() -> bool {
    DEFAULT_SHOW_GRID
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("failed to load {}: {err}", path.display());
                    return (Config::default(), Some("config-load-error".to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
