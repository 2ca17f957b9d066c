// SPDX-License-Identifier: MPL-2.0
//! Viewport state management
//!
//! Holds the pan offset, zoom, drag session and natural image size, together
//! with the transition rules driven by pointer and wheel input.

use crate::domain::media::{ImageSource, NaturalSize};
use crate::media::loader::{LoadRequest, LoadTracker, RequestId};
use crate::ui::geometry::{self, LayoutElement, LayoutMeasurer};
use crate::ui::state::zoom::{wheel_direction, ZoomConfig, ZoomState};
use crate::ui::state::DragSession;
use iced::{Point, Rectangle, Vector};

/// Lifecycle of the current image load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// No image requested yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading(RequestId),
    /// The natural size is known.
    Ready,
    /// The latest load failed.
    Failed(String),
}

/// Result of feeding a load response into the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response matched the latest request and was applied.
    Applied,
    /// The response belonged to a superseded request and was dropped.
    Stale,
}

/// Pan/zoom view state of a single image.
#[derive(Debug, Clone)]
pub struct ViewportState {
    /// Current pan translation relative to the centered position
    pub offset: Vector,

    /// Current zoom level
    pub zoom: ZoomState,

    /// Drag in progress, if any
    pub drag: DragSession,

    /// Natural pixel size of the loaded image
    pub natural_size: NaturalSize,

    /// Source of the image currently requested
    pub source: Option<ImageSource>,

    /// Status of the latest load
    pub status: LoadStatus,

    loads: LoadTracker,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ViewportState {
    /// Creates an empty viewport using the given zoom bounds.
    #[must_use]
    pub fn new(zoom: ZoomConfig) -> Self {
        Self {
            offset: Vector::new(0.0, 0.0),
            zoom: ZoomState::new(zoom),
            drag: DragSession::default(),
            natural_size: NaturalSize::default(),
            source: None,
            status: LoadStatus::Idle,
            loads: LoadTracker::new(),
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready && !self.natural_size.is_empty()
    }

    // -------------------------------------------------------------------------
    // Drag
    // -------------------------------------------------------------------------

    /// Starts a drag anchored at `pointer`. No effect if one is already active.
    pub fn begin_drag(&mut self, pointer: Point) -> bool {
        self.drag.begin(pointer, self.offset)
    }

    /// Moves the image with the pointer. Unbounded while the pointer is held.
    pub fn update_drag(&mut self, pointer: Point) -> bool {
        match self.drag.offset_for(pointer) {
            Some(offset) => {
                self.offset = offset;
                true
            }
            None => false,
        }
    }

    /// Ends the drag and corrects over-travel using the measured rectangles.
    pub fn end_drag(&mut self, container: Rectangle, image: Rectangle) -> bool {
        if !self.drag.end() {
            return false;
        }
        let clamped = geometry::clamp_offset(self.offset, container, image);
        if clamped != self.offset {
            log::debug!(
                "drag released at ({:.1}, {:.1}), clamped to ({:.1}, {:.1})",
                self.offset.x,
                self.offset.y,
                clamped.x,
                clamped.y
            );
        }
        self.offset = clamped;
        true
    }

    /// Ends the drag, measuring both rectangles through `layout`.
    pub fn end_drag_measured(&mut self, layout: &impl LayoutMeasurer) -> bool {
        let container = layout.measure(LayoutElement::Container);
        let image = layout.measure(LayoutElement::Image);
        self.end_drag(container, image)
    }

    // -------------------------------------------------------------------------
    // Zoom
    // -------------------------------------------------------------------------

    /// Steps the zoom by one level in the direction of `direction`'s sign.
    /// Out-of-range steps are discarded.
    pub fn apply_zoom_delta(&mut self, direction: f32) -> bool {
        let changed = self.zoom.apply_delta(direction);
        if changed {
            log::debug!("zoom changed to {}", self.zoom.label());
        }
        changed
    }

    /// Applies one wheel tick. Positive deltas (scroll down) zoom out.
    pub fn apply_wheel(&mut self, delta_y: f32) -> bool {
        self.apply_zoom_delta(wheel_direction(delta_y))
    }

    /// Re-runs the overscroll correction outside of a drag, e.g. after zoom.
    pub fn clamp_to(&mut self, container: Rectangle) {
        let image = self.rendered_image_rect(container);
        self.offset = geometry::clamp_offset(self.offset, container, image);
    }

    /// Centers the image and returns to the minimum zoom.
    pub fn reset_view(&mut self) {
        self.offset = Vector::new(0.0, 0.0);
        self.zoom.reset();
        self.drag.end();
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Requests `source`, superseding any in-flight load.
    ///
    /// Offset and zoom are left untouched; the caller performs the returned
    /// request and feeds the answer back through [`Self::on_image_loaded`].
    pub fn load_image(&mut self, source: ImageSource) -> LoadRequest {
        let request = self.loads.issue(source.clone());
        self.source = Some(source);
        self.status = LoadStatus::Loading(request.id);
        request
    }

    /// Applies a load response if it answers the latest request.
    ///
    /// On failure the natural size is left as it was and the error is kept
    /// for display.
    pub fn on_image_loaded(
        &mut self,
        id: RequestId,
        result: Result<NaturalSize, String>,
    ) -> LoadOutcome {
        if !self.loads.is_current(id) {
            log::warn!("discarding stale image load response #{}", id.value());
            return LoadOutcome::Stale;
        }

        match result {
            Ok(size) => {
                self.natural_size = size;
                self.status = LoadStatus::Ready;
            }
            Err(message) => {
                self.status = LoadStatus::Failed(message);
            }
        }
        LoadOutcome::Applied
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Image bounds for the current offset and zoom inside `container`.
    #[must_use]
    pub fn rendered_image_rect(&self, container: Rectangle) -> Rectangle {
        geometry::rendered_image_rect(self.natural_size, self.zoom.factor(), self.offset, container)
    }
}
