// SPDX-License-Identifier: MPL-2.0
//! Zoom state management
//!
//! This module handles all zoom-related state and logic, including:
//! - Discrete zoom levels derived from a [`ZoomConfig`]
//! - Stepping in and out with silent saturation at the bounds
//! - Wheel delta interpretation

pub use crate::domain::ui::newtypes::{zoom_bounds, ZoomConfig, ZoomFactor};

/// Manages the zoom level of the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomState {
    /// Current level; factor is `min_zoom + level * zoom_step`
    level: u32,

    /// Bounds and step (guaranteed valid by type)
    config: ZoomConfig,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ZoomState {
    /// Creates a zoom state at the minimum level.
    #[must_use]
    pub fn new(config: ZoomConfig) -> Self {
        Self { level: 0, config }
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Current zoom factor.
    #[must_use]
    pub fn factor(&self) -> ZoomFactor {
        self.config.factor_at(self.level)
    }

    #[must_use]
    pub fn is_min(&self) -> bool {
        self.level == 0
    }

    #[must_use]
    pub fn is_max(&self) -> bool {
        self.level >= self.config.max_level()
    }

    /// Steps one level in. Returns `false` (no change) at the maximum.
    pub fn zoom_in(&mut self) -> bool {
        if self.is_max() {
            return false;
        }
        self.level += 1;
        true
    }

    /// Steps one level out. Returns `false` (no change) at the minimum.
    pub fn zoom_out(&mut self) -> bool {
        if self.is_min() {
            return false;
        }
        self.level -= 1;
        true
    }

    /// Applies a signed zoom direction: positive zooms in, negative zooms out.
    ///
    /// Only the sign is used. Steps that would leave the bounds are discarded.
    pub fn apply_delta(&mut self, direction: f32) -> bool {
        if direction > 0.0 {
            self.zoom_in()
        } else if direction < 0.0 {
            self.zoom_out()
        } else {
            false
        }
    }

    /// Returns to the minimum level.
    pub fn reset(&mut self) {
        self.level = 0;
    }

    /// Formats the factor as a percentage label (e.g., "130%").
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}%", format_number(self.factor().as_percent()))
    }
}

/// Maps a wheel delta to a zoom direction.
///
/// The delta follows the "positive = scroll down / away from the user"
/// convention: positive deltas zoom out, negative ones zoom in, and the
/// magnitude is ignored so every tick is exactly one step.
#[must_use]
pub fn wheel_direction(delta_y: f32) -> f32 {
    if delta_y > 0.0 {
        -1.0
    } else if delta_y < 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Formats a number for display (removes unnecessary decimal places)
#[must_use]
pub fn format_number(value: f32) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract().abs() < f32::EPSILON {
        // Value has no fractional part, so it represents an integer exactly
        #[allow(clippy::cast_possible_truncation)]
        let int_value = rounded as i32;
        format!("{int_value}")
    } else {
        format!("{rounded:.1}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn default_zoom_state_starts_at_minimum() {
        let state = ZoomState::default();
        assert!(state.is_min());
        assert_abs_diff_eq!(state.factor().value(), 1.0);
    }

    #[test]
    fn three_steps_in_reach_one_point_nine() {
        let mut state = ZoomState::default();
        for _ in 0..3 {
            assert!(state.apply_delta(1.0));
        }
        assert_abs_diff_eq!(state.factor().value(), 1.9, epsilon = 1e-5);
    }

    #[test]
    fn zoom_out_at_minimum_is_noop() {
        let mut state = ZoomState::default();
        assert!(!state.zoom_out());
        assert_eq!(state.level(), 0);
    }

    #[test]
    fn zoom_in_at_maximum_is_noop() {
        let mut state = ZoomState::default();
        while state.zoom_in() {}
        assert!(state.is_max());
        assert_abs_diff_eq!(state.factor().value(), 2.5, epsilon = 1e-5);

        let before = state.clone();
        assert!(!state.apply_delta(1.0));
        assert_eq!(state, before);
    }

    #[test]
    fn zero_delta_changes_nothing() {
        let mut state = ZoomState::default();
        assert!(!state.apply_delta(0.0));
        assert!(state.is_min());
    }

    #[test]
    fn magnitude_of_delta_is_ignored() {
        let mut state = ZoomState::default();
        state.apply_delta(250.0);
        assert_eq!(state.level(), 1);
    }

    #[test]
    fn wheel_direction_inverts_sign() {
        assert_abs_diff_eq!(wheel_direction(3.0), -1.0);
        assert_abs_diff_eq!(wheel_direction(-0.01), 1.0);
        assert_abs_diff_eq!(wheel_direction(0.0), 0.0);
    }

    #[test]
    fn label_formats_percentage() {
        let mut state = ZoomState::default();
        assert_eq!(state.label(), "100%");
        state.zoom_in();
        assert_eq!(state.label(), "130%");
    }

    #[test]
    fn format_number_trims_decimals() {
        assert_eq!(format_number(130.0), "130");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(189.99998), "190");
    }
}
