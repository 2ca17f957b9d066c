// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for UI values,
//! ensuring they are always within valid ranges.

use crate::domain::error::ZoomConfigError;

// =============================================================================
// Zoom Bounds
// =============================================================================

/// Default zoom bounds (factor 1.0 to 2.5 in 0.3 steps).
pub mod zoom_bounds {
    /// Default zoom step.
    pub const DEFAULT_STEP: f32 = 0.3;
    /// Default minimum zoom factor.
    pub const DEFAULT_MIN: f32 = 1.0;
    /// Number of steps between the minimum and the maximum.
    pub const DEFAULT_LEVELS: u32 = 5;
    /// Default maximum zoom factor.
    #[allow(clippy::cast_precision_loss)]
    pub const DEFAULT_MAX: f32 = DEFAULT_MIN + DEFAULT_STEP * DEFAULT_LEVELS as f32;
}

/// Tolerance used when counting how many whole steps fit between the bounds.
const LEVEL_EPSILON: f32 = 1e-4;

// =============================================================================
// ZoomFactor
// =============================================================================

/// Uniform scale multiplier applied to the rendered image (1.0 = fitted size).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    /// The unscaled factor.
    pub const ONE: Self = Self(1.0);

    /// Returns the raw multiplier.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the factor as a percentage (e.g., 1.3 → 130.0).
    #[must_use]
    pub fn as_percent(self) -> f32 {
        self.0 * 100.0
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self(zoom_bounds::DEFAULT_MIN)
    }
}

// =============================================================================
// ZoomConfig
// =============================================================================

/// Zoom bounds and step, passed to the viewer at construction.
///
/// Zoom is modelled as a discrete level: level `n` maps to
/// `min_zoom + n * zoom_step`, and the highest level is the last one that
/// does not exceed `max_zoom`. Stepping by level keeps the reachable factors
/// exact instead of accumulating floating point drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomConfig {
    zoom_step: f32,
    min_zoom: f32,
    max_zoom: f32,
}

impl ZoomConfig {
    /// Creates a validated zoom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the step or minimum is not strictly positive, or if
    /// the maximum is below the minimum.
    pub fn new(zoom_step: f32, min_zoom: f32, max_zoom: f32) -> Result<Self, ZoomConfigError> {
        if !zoom_step.is_finite() || zoom_step <= 0.0 {
            return Err(ZoomConfigError::InvalidStep(zoom_step));
        }
        if !min_zoom.is_finite() || min_zoom <= 0.0 {
            return Err(ZoomConfigError::InvalidMinimum(min_zoom));
        }
        if !max_zoom.is_finite() || max_zoom < min_zoom {
            return Err(ZoomConfigError::InvalidMaximum {
                min: min_zoom,
                max: max_zoom,
            });
        }
        Ok(Self {
            zoom_step,
            min_zoom,
            max_zoom,
        })
    }

    #[must_use]
    pub fn zoom_step(&self) -> f32 {
        self.zoom_step
    }

    #[must_use]
    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    #[must_use]
    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    /// Highest reachable zoom level.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn max_level(&self) -> u32 {
        ((self.max_zoom - self.min_zoom) / self.zoom_step + LEVEL_EPSILON).floor() as u32
    }

    /// Returns the zoom factor for a level, saturating at the highest level.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn factor_at(&self, level: u32) -> ZoomFactor {
        let level = level.min(self.max_level());
        ZoomFactor((self.min_zoom + self.zoom_step * level as f32).min(self.max_zoom))
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            zoom_step: zoom_bounds::DEFAULT_STEP,
            min_zoom: zoom_bounds::DEFAULT_MIN,
            max_zoom: zoom_bounds::DEFAULT_MAX,
        }
    }
}

const _: () = {
    assert!(zoom_bounds::DEFAULT_STEP > 0.0);
    assert!(zoom_bounds::DEFAULT_MIN > 0.0);
    assert!(zoom_bounds::DEFAULT_MAX > zoom_bounds::DEFAULT_MIN);
};

// =============================================================================
// Tests
// =============================================================================
