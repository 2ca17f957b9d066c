// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Handles grab-and-drag interaction state for panning the image.

use iced::{Point, Vector};

/// Ephemeral drag session, alive between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Whether a drag operation is currently active
    pub active: bool,

    /// Pointer position minus the pan offset at drag start
    pub anchor: Point,
}

impl Default for DragSession {
    fn default() -> Self {
        Self {
            active: false,
            anchor: Point::ORIGIN,
        }
    }
}

impl DragSession {
    /// Starts a drag operation. Returns `false` if one was already active.
    pub fn begin(&mut self, pointer: Point, offset: Vector) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.anchor = Point::new(pointer.x - offset.x, pointer.y - offset.y);
        true
    }

    /// Calculates the pan offset that keeps the anchor under the pointer.
    #[must_use]
    pub fn offset_for(&self, pointer: Point) -> Option<Vector> {
        if !self.active {
            return None;
        }
        Some(Vector::new(pointer.x - self.anchor.x, pointer.y - self.anchor.y))
    }

    /// Stops the drag operation. Returns `false` if none was active.
    pub fn end(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active
    }
}
