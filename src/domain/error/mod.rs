// SPDX-License-Identifier: MPL-2.0
//! Domain error types.
//!
//! This module provides pure domain error types that are independent
//! of external crates and infrastructure concerns.

use std::fmt;

/// Reasons a zoom configuration can be rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomConfigError {
    /// The step must be strictly positive and finite.
    InvalidStep(f32),
    /// The minimum zoom must be strictly positive and finite.
    InvalidMinimum(f32),
    /// The maximum zoom must be finite and not below the minimum.
    InvalidMaximum { min: f32, max: f32 },
}

impl fmt::Display for ZoomConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoomConfigError::InvalidStep(step) => {
                write!(f, "zoom step must be positive, got {step}")
            }
            ZoomConfigError::InvalidMinimum(min) => {
                write!(f, "minimum zoom must be positive, got {min}")
            }
            ZoomConfigError::InvalidMaximum { min, max } => {
                write!(f, "maximum zoom {max} must not be below minimum {min}")
            }
        }
    }
}

impl std::error::Error for ZoomConfigError {}
