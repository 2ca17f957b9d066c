// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--config-dir`, `--export-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`ICED_CROPPER_CONFIG_DIR`, `ICED_CROPPER_EXPORT_DIR`)
//! 4. **Platform default** - via `dirs` crate
//!
//! The export directory has one more step between 3 and 4: the `[export]
//! directory` setting, passed by the caller as the override.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "IcedCropper";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_CROPPER_CONFIG_DIR";

/// Environment variable to override the export directory.
pub const ENV_EXPORT_DIR: &str = "ICED_CROPPER_EXPORT_DIR";

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_EXPORT_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--config-dir` and `--export-dir` CLI arguments.
///
/// Only the first call has an effect; later calls are logged and ignored.
pub fn init_cli_overrides(config_dir: Option<String>, export_dir: Option<String>) {
    if CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err()
        || CLI_EXPORT_DIR.set(export_dir.map(PathBuf::from)).is_err()
    {
        log::warn!("CLI path overrides already initialized");
    }
}

fn env_dir(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Returns the application config directory, honoring an explicit override.
///
/// Platform defaults:
/// - Linux: `~/.config/IcedCropper/`
/// - macOS: `~/Library/Application Support/IcedCropper/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\IcedCropper\`
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = CLI_CONFIG_DIR.get().and_then(Clone::clone) {
        return Some(path);
    }

    if let Some(path) = env_dir(ENV_CONFIG_DIR) {
        return Some(path);
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the directory exports are written to.
///
/// `configured` is the `[export] directory` setting. The CLI and the
/// environment take precedence over it; without any of them the platform
/// download directory is used, then the current directory.
pub fn get_export_dir(configured: Option<PathBuf>) -> PathBuf {
    if let Some(path) = CLI_EXPORT_DIR.get().and_then(Clone::clone) {
        return path;
    }
    resolve_export_dir(env_dir(ENV_EXPORT_DIR), configured)
}

fn resolve_export_dir(env: Option<PathBuf>, configured: Option<PathBuf>) -> PathBuf {
    env.or(configured)
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
