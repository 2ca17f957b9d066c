// SPDX-License-Identifier: MPL-2.0
//! Pan/zoom/crop geometry.
//!
//! Stateless functions that operate on the viewer state plus measured
//! rectangles. Rendered geometry is never cached: callers measure the
//! container and derive the image rectangle from the current state every
//! time a decision depends on it (drag release, export).

use crate::domain::media::NaturalSize;
use crate::domain::ui::ZoomFactor;
use crate::ui::state::ViewportState;
use iced::{Point, Rectangle, Size, Vector};

/// Elements whose on-screen bounds the geometry engine may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutElement {
    /// The fixed viewport the image is shown in.
    Container,
    /// The image after pan and zoom are applied.
    Image,
}

/// Capability to read the current bounds of a laid-out element.
///
/// Implemented by the UI layer and injected into the engine, so the engine
/// can be exercised without a display surface.
pub trait LayoutMeasurer {
    fn measure(&self, element: LayoutElement) -> Rectangle;
}

/// Measurer backed by the live viewer state and the container's last layout
/// bounds. The image rectangle is recomputed on every call.
#[derive(Debug, Clone, Copy)]
pub struct MeasuredLayout<'a> {
    state: &'a ViewportState,
    container: Rectangle,
}

impl<'a> MeasuredLayout<'a> {
    #[must_use]
    pub fn new(state: &'a ViewportState, container: Rectangle) -> Self {
        Self { state, container }
    }
}

impl LayoutMeasurer for MeasuredLayout<'_> {
    fn measure(&self, element: LayoutElement) -> Rectangle {
        match element {
            LayoutElement::Container => self.container,
            LayoutElement::Image => self.state.rendered_image_rect(self.container),
        }
    }
}

/// Measurer returning fixed rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLayout {
    pub container: Rectangle,
    pub image: Rectangle,
}

impl FixedLayout {
    /// Freezes the current answers of another measurer.
    #[must_use]
    pub fn snapshot(layout: &impl LayoutMeasurer) -> Self {
        Self {
            container: layout.measure(LayoutElement::Container),
            image: layout.measure(LayoutElement::Image),
        }
    }
}

impl LayoutMeasurer for FixedLayout {
    fn measure(&self, element: LayoutElement) -> Rectangle {
        match element {
            LayoutElement::Container => self.container,
            LayoutElement::Image => self.image,
        }
    }
}

// =============================================================================
// Rendered geometry
// =============================================================================

/// Size of the image at zoom 1.
///
/// Landscape images take the container's full height, portrait images its
/// full width; the other side follows the natural aspect ratio.
#[must_use]
pub fn base_image_size(natural: NaturalSize, container: Size) -> Size {
    let Some(aspect) = natural.aspect_ratio() else {
        return Size::ZERO;
    };
    if natural.is_landscape() {
        Size::new(container.height * aspect, container.height)
    } else {
        Size::new(container.width, container.width / aspect)
    }
}

/// On-screen bounds of the image: the base size scaled by `zoom`, centered in
/// the container and translated by the pan `offset`.
#[must_use]
pub fn rendered_image_rect(
    natural: NaturalSize,
    zoom: ZoomFactor,
    offset: Vector,
    container: Rectangle,
) -> Rectangle {
    let base = base_image_size(natural, container.size());
    let size = Size::new(base.width * zoom.value(), base.height * zoom.value());
    let center = container.center() + offset;
    Rectangle::new(
        Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
        size,
    )
}

// =============================================================================
// Overscroll correction
// =============================================================================

fn is_degenerate(rect: Rectangle) -> bool {
    !(rect.width > 0.0 && rect.height > 0.0 && rect.width.is_finite() && rect.height.is_finite())
}

/// Clamps one axis of the pan offset.
///
/// When the image is larger than the container the offset may travel
/// `(image - container) / 2` in either direction; otherwise it is pinned to 0.
#[must_use]
pub fn clamp_axis(offset: f32, image_len: f32, container_len: f32) -> f32 {
    if image_len > container_len {
        let slack = (image_len - container_len) / 2.0;
        offset.clamp(-slack, slack)
    } else {
        0.0
    }
}

/// Corrects over-travel on both axes in one pass.
///
/// A zero-sized image rectangle (nothing loaded yet) leaves the offset
/// untouched.
#[must_use]
pub fn clamp_offset(offset: Vector, container: Rectangle, image: Rectangle) -> Vector {
    if is_degenerate(image) {
        return offset;
    }
    Vector::new(
        clamp_axis(offset.x, image.width, container.width),
        clamp_axis(offset.y, image.height, container.height),
    )
}

// =============================================================================
// Crop mapping
// =============================================================================

/// Visible region mapped back onto the original image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegion {
    /// Source rectangle in natural pixel coordinates. May extend past the
    /// image when the view shows background.
    pub source: Rectangle,
    /// Output size, matching the container's on-screen pixel size.
    pub destination: Size<u32>,
}

/// Maps the container's visible area onto natural image pixels.
///
/// `ratio = natural.width / image.width`; the source origin is the distance
/// between the container and image origins times `ratio`, and its size is the
/// container size times `ratio`. Returns `None` when any input is empty.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn crop_region(
    natural: NaturalSize,
    container: Rectangle,
    image: Rectangle,
) -> Option<CropRegion> {
    if natural.is_empty() || is_degenerate(image) || is_degenerate(container) {
        return None;
    }

    let ratio = natural.width as f32 / image.width;
    let source = Rectangle::new(
        Point::new(
            (container.x - image.x).abs() * ratio,
            (container.y - image.y).abs() * ratio,
        ),
        Size::new(container.width * ratio, container.height * ratio),
    );
    let destination = Size::new(
        container.width.round().max(1.0) as u32,
        container.height.round().max(1.0) as u32,
    );

    Some(CropRegion {
        source,
        destination,
    })
}

/// Convenience wrapper measuring both elements through a [`LayoutMeasurer`].
#[must_use]
pub fn crop_region_measured(
    natural: NaturalSize,
    layout: &impl LayoutMeasurer,
) -> Option<CropRegion> {
    crop_region(
        natural,
        layout.measure(LayoutElement::Container),
        layout.measure(LayoutElement::Image),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn base_size_pins_height_for_landscape() {
        let size = base_image_size(NaturalSize::new(1600, 800), Size::new(400.0, 300.0));
        assert_abs_diff_eq!(size.height, 300.0);
        assert_abs_diff_eq!(size.width, 600.0);
    }

    #[test]
    fn base_size_pins_width_for_portrait() {
        let size = base_image_size(NaturalSize::new(500, 1000), Size::new(400.0, 300.0));
        assert_abs_diff_eq!(size.width, 400.0);
        assert_abs_diff_eq!(size.height, 800.0);
    }

    #[test]
    fn base_size_of_unloaded_image_is_zero() {
        let size = base_image_size(NaturalSize::default(), Size::new(400.0, 300.0));
        assert_eq!(size, Size::ZERO);
    }

    #[test]
    fn rendered_rect_is_centered_then_translated() {
        let container = rect(10.0, 20.0, 400.0, 300.0);
        let image = rendered_image_rect(
            NaturalSize::new(800, 300),
            ZoomFactor::ONE,
            Vector::new(15.0, -5.0),
            container,
        );
        assert_abs_diff_eq!(image.width, 800.0);
        assert_abs_diff_eq!(image.height, 300.0);
        assert_abs_diff_eq!(image.x, 10.0 + 200.0 - 400.0 + 15.0);
        assert_abs_diff_eq!(image.y, 20.0 - 5.0);
    }

    #[test]
    fn rendered_rect_scales_with_zoom_around_center() {
        let container = rect(0.0, 0.0, 300.0, 300.0);
        let config = crate::domain::ui::ZoomConfig::default();
        let image = rendered_image_rect(
            NaturalSize::new(100, 100),
            config.factor_at(5),
            Vector::new(0.0, 0.0),
            container,
        );
        assert_abs_diff_eq!(image.width, 750.0, epsilon = 1e-3);
        assert_abs_diff_eq!(image.center_x(), 150.0, epsilon = 1e-3);
    }

    #[test]
    fn clamp_reduces_horizontal_overtravel_and_pins_fitting_axis() {
        let container = rect(0.0, 0.0, 400.0, 300.0);
        let image = rect(0.0, 0.0, 800.0, 300.0);
        let clamped = clamp_offset(Vector::new(500.0, 40.0), container, image);
        assert_abs_diff_eq!(clamped.x, 200.0);
        assert_abs_diff_eq!(clamped.y, 0.0);
    }

    #[test]
    fn clamp_corrects_both_axes_at_once() {
        let container = rect(0.0, 0.0, 400.0, 300.0);
        let image = rect(0.0, 0.0, 800.0, 500.0);
        let clamped = clamp_offset(Vector::new(-900.0, 900.0), container, image);
        assert_abs_diff_eq!(clamped.x, -200.0);
        assert_abs_diff_eq!(clamped.y, 100.0);
    }

    #[test]
    fn clamp_keeps_legal_offsets() {
        let container = rect(0.0, 0.0, 400.0, 300.0);
        let image = rect(0.0, 0.0, 800.0, 500.0);
        let offset = Vector::new(-150.0, 99.0);
        assert_eq!(clamp_offset(offset, container, image), offset);
    }

    #[test]
    fn clamp_is_idempotent() {
        let container = rect(0.0, 0.0, 400.0, 300.0);
        let image = rect(0.0, 0.0, 640.0, 420.0);
        let once = clamp_offset(Vector::new(321.0, -987.0), container, image);
        let twice = clamp_offset(once, container, image);
        assert_eq!(once, twice);
    }

    #[test]
    fn clamp_with_zero_sized_image_is_noop() {
        let container = rect(0.0, 0.0, 400.0, 300.0);
        let image = rect(200.0, 150.0, 0.0, 0.0);
        let offset = Vector::new(42.0, -7.0);
        let clamped = clamp_offset(offset, container, image);
        assert_eq!(clamped, offset);
        assert!(clamped.x.is_finite() && clamped.y.is_finite());
    }

    #[test]
    fn crop_of_unpanned_full_image_is_identity() {
        let natural = NaturalSize::new(1200, 900);
        let shown = rect(50.0, 40.0, 400.0, 300.0);
        let region = crop_region(natural, shown, shown).expect("region");

        assert_abs_diff_eq!(region.source.x, 0.0);
        assert_abs_diff_eq!(region.source.y, 0.0);
        assert_abs_diff_eq!(region.source.width, 1200.0, epsilon = 1e-3);
        assert_abs_diff_eq!(region.source.height, 900.0, epsilon = 1e-3);
        assert_eq!(region.destination, Size::new(400, 300));
    }

    #[test]
    fn crop_maps_visible_window_to_native_pixels() {
        // Image rendered at twice the container width, panned fully right.
        let natural = NaturalSize::new(1600, 600);
        let container = rect(0.0, 0.0, 400.0, 300.0);
        let image = rect(-400.0, 0.0, 800.0, 300.0);
        let region = crop_region(natural, container, image).expect("region");

        assert_abs_diff_eq!(region.source.x, 800.0);
        assert_abs_diff_eq!(region.source.y, 0.0);
        assert_abs_diff_eq!(region.source.width, 800.0);
        assert_abs_diff_eq!(region.source.height, 600.0);
    }

    #[test]
    fn crop_requires_loaded_image() {
        let shown = rect(0.0, 0.0, 400.0, 300.0);
        assert!(crop_region(NaturalSize::default(), shown, shown).is_none());
        assert!(crop_region(NaturalSize::new(10, 10), shown, rect(0.0, 0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn fixed_layout_returns_given_rectangles() {
        let layout = FixedLayout {
            container: rect(0.0, 0.0, 10.0, 10.0),
            image: rect(1.0, 1.0, 20.0, 20.0),
        };
        assert_eq!(layout.measure(LayoutElement::Container), layout.container);
        assert_eq!(layout.measure(LayoutElement::Image), layout.image);

        let region = crop_region_measured(NaturalSize::new(40, 40), &layout).expect("region");
        assert_abs_diff_eq!(region.source.x, 2.0);
    }

    #[test]
    fn measured_layout_derives_image_from_state() {
        let mut state = ViewportState::default();
        let request = state.load_image(crate::domain::media::ImageSource::parse("a.png"));
        state.on_image_loaded(request.id, Ok(NaturalSize::new(800, 300)));
        state.offset = Vector::new(10.0, 0.0);

        let container = rect(0.0, 0.0, 400.0, 300.0);
        let snapshot = FixedLayout::snapshot(&MeasuredLayout::new(&state, container));

        assert_eq!(snapshot.container, container);
        assert_abs_diff_eq!(snapshot.image.width, 800.0);
        assert_abs_diff_eq!(snapshot.image.x, -200.0 + 10.0);
    }
}
