// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.

pub use crate::domain::ui::newtypes::zoom_bounds::{
    DEFAULT_MAX as DEFAULT_MAX_ZOOM, DEFAULT_MIN as DEFAULT_MIN_ZOOM,
    DEFAULT_STEP as DEFAULT_ZOOM_STEP,
};

// ==========================================================================
// Viewport Defaults
// ==========================================================================

/// Window width used when no fixed viewport size is configured.
pub const DEFAULT_WINDOW_WIDTH: f32 = 800.0;

/// Window height used when no fixed viewport size is configured.
pub const DEFAULT_WINDOW_HEIGHT: f32 = 600.0;

/// Smallest accepted fixed viewport side, in logical pixels.
pub const MIN_VIEWPORT_SIDE: f32 = 16.0;

/// Largest accepted fixed viewport side, in logical pixels.
pub const MAX_VIEWPORT_SIDE: f32 = 8192.0;

/// Whether the rule-of-thirds grid is drawn while hovering.
pub const DEFAULT_SHOW_GRID: bool = true;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_VIEWPORT_SIDE > 0.0);
    assert!(MIN_VIEWPORT_SIDE < MAX_VIEWPORT_SIDE);
    assert!(DEFAULT_WINDOW_WIDTH >= MIN_VIEWPORT_SIDE);
    assert!(DEFAULT_WINDOW_HEIGHT >= MIN_VIEWPORT_SIDE);
    assert!(DEFAULT_MIN_ZOOM > 0.0);
    assert!(DEFAULT_MAX_ZOOM >= DEFAULT_MIN_ZOOM);
};
