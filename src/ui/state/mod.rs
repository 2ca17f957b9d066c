// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! This module contains the pan/zoom view state, kept apart from the widget
//! code so it can be driven and tested without a window.

pub mod drag;
pub mod viewport;
pub mod zoom;

// Re-export commonly used types for convenience
pub use drag::DragSession;
pub use viewport::{LoadOutcome, LoadStatus, ViewportState};
pub use zoom::ZoomState;
