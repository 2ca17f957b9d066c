// SPDX-License-Identifier: MPL-2.0
//! Canvas program painting the panned/zoomed image and turning raw mouse
//! events into viewer messages.

use crate::ui::state::ViewportState;
use crate::ui::viewer::component::Message;
use iced::advanced::image::{FilterMethod, Image};
use iced::widget::canvas::{self, Frame, Path, Stroke};
use iced::widget::{image, Action};
use iced::{mouse, Color, Event, Point, Rectangle, Size, Theme};

/// Pixels of a precise scroll gesture counted as one wheel tick.
const PIXELS_PER_LINE: f32 = 120.0;

const BACKGROUND: Color = Color::from_rgb(0.08, 0.08, 0.08);
const GRID_COLOR: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.45);
const GRID_WIDTH: f32 = 1.0;

/// Converts an iced wheel delta into a browser-style `delta_y`.
///
/// iced reports scrolling away from the user as positive `y`; the viewer
/// follows the web convention where scrolling down is positive, so the sign
/// is flipped. Returns `None` for purely horizontal or empty deltas.
#[must_use]
pub fn wheel_delta_y(delta: &mouse::ScrollDelta) -> Option<f32> {
    let steps = match delta {
        mouse::ScrollDelta::Lines { y, .. } => *y,
        mouse::ScrollDelta::Pixels { y, .. } => *y / PIXELS_PER_LINE,
    };
    (steps.abs() >= f32::EPSILON).then_some(-steps)
}

/// Canvas program for the viewport.
pub struct ViewportCanvas<'a> {
    pub viewport: &'a ViewportState,
    pub image: Option<&'a image::Handle>,
    /// Bounds the component last saw; a mismatch triggers a re-measure.
    pub known_bounds: Option<Rectangle>,
    pub hovered: bool,
    pub show_grid: bool,
}

impl ViewportCanvas<'_> {
    /// Maps one event to at most one message.
    ///
    /// Returns `(message, capture)`.
    #[must_use]
    pub fn translate(
        &self,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<(Message, bool)> {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_over(bounds)?;
                Some((Message::PointerPressed { position, bounds }, true))
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                let over = bounds.contains(*position);
                if self.viewport.is_dragging() {
                    Some((
                        Message::PointerMoved {
                            position: *position,
                            over,
                        },
                        true,
                    ))
                } else if over != self.hovered {
                    Some((
                        Message::PointerMoved {
                            position: *position,
                            over,
                        },
                        false,
                    ))
                } else {
                    None
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => self
                .viewport
                .is_dragging()
                .then_some((Message::PointerReleased { bounds }, true)),
            Event::Mouse(mouse::Event::CursorLeft) => {
                if self.viewport.is_dragging() {
                    // Losing the pointer ends the drag like a release would
                    Some((Message::PointerReleased { bounds }, true))
                } else {
                    self.hovered.then_some((Message::CursorLeft, false))
                }
            }
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if !cursor.is_over(bounds) {
                    return None;
                }
                let delta_y = wheel_delta_y(delta)?;
                Some((Message::WheelScrolled { delta_y, bounds }, true))
            }
            _ => (self.known_bounds != Some(bounds))
                .then_some((Message::LayoutMeasured(bounds), false)),
        }
    }
}

impl canvas::Program<Message> for ViewportCanvas<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        let (message, capture) = self.translate(event, bounds, cursor)?;
        let action = Action::publish(message);
        Some(if capture { action.and_capture() } else { action })
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let local = Rectangle::with_size(bounds.size());

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND);

        if let Some(handle) = self.image {
            let target = self.viewport.rendered_image_rect(local);
            if target.width > 0.0 && target.height > 0.0 {
                frame.draw_image(
                    target,
                    Image {
                        handle: handle.clone(),
                        filter_method: FilterMethod::Linear,
                        rotation: iced::Radians(0.0),
                        opacity: 1.0,
                        snap: true,
                        border_radius: iced::border::Radius::default(),
                    },
                );
            }
        }

        if self.show_grid && self.hovered {
            draw_thirds(&mut frame, bounds.size());
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.viewport.is_dragging() {
            mouse::Interaction::Grabbing
        } else if self.image.is_some() && cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

/// Rule-of-thirds guide over the whole viewport.
fn draw_thirds(frame: &mut Frame, size: Size) {
    let stroke = || {
        Stroke::default()
            .with_width(GRID_WIDTH)
            .with_color(GRID_COLOR)
    };

    for i in 1..3 {
        #[allow(clippy::cast_precision_loss)]
        let fraction = i as f32 / 3.0;

        let x = size.width * fraction;
        frame.stroke(
            &Path::line(Point::new(x, 0.0), Point::new(x, size.height)),
            stroke(),
        );

        let y = size.height * fraction;
        frame.stroke(
            &Path::line(Point::new(0.0, y), Point::new(size.width, y)),
            stroke(),
        );
    }
}
