// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::viewer::component;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Viewer(component::Message),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Flags {
    /// Image path or `http(s)` URL to open on startup.
    pub image: Option<String>,
    /// Fixed viewport width, overriding `[viewport] width`.
    pub width: Option<f32>,
    /// Fixed viewport height, overriding `[viewport] height`.
    pub height: Option<f32>,
    /// Config directory override (for settings.toml).
    /// Takes precedence over `ICED_CROPPER_CONFIG_DIR`.
    pub config_dir: Option<String>,
    /// Export directory override.
    /// Takes precedence over `ICED_CROPPER_EXPORT_DIR` and `[export] directory`.
    pub export_dir: Option<String>,
}
