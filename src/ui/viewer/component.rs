// SPDX-License-Identifier: MPL-2.0
//! Viewer component encapsulating state and update logic.

use crate::domain::media::{ImageSource, NaturalSize};
use crate::domain::ui::ZoomConfig;
use crate::error::{Error, ExportError};
use crate::media::{self, DirectorySink, ExportFormat, ExportRequest, ImageData, RequestId};
use crate::ui::geometry::{FixedLayout, MeasuredLayout};
use crate::ui::state::{LoadOutcome, LoadStatus, ViewportState};
use crate::ui::viewer::canvas::ViewportCanvas;
use iced::widget::{button, canvas, Column, Container, Row, Text};
use iced::{alignment, Element, Length, Point, Rectangle, Task};
use std::path::PathBuf;

/// Messages emitted by viewer-related widgets.
#[derive(Debug, Clone)]
pub enum Message {
    /// The canvas reported its current layout bounds.
    LayoutMeasured(Rectangle),
    PointerPressed {
        position: Point,
        bounds: Rectangle,
    },
    PointerMoved {
        position: Point,
        over: bool,
    },
    PointerReleased {
        bounds: Rectangle,
    },
    CursorLeft,
    /// One wheel tick; positive `delta_y` means scrolling down.
    WheelScrolled {
        delta_y: f32,
        bounds: Rectangle,
    },
    LoadSource(ImageSource),
    ImageLoaded {
        id: RequestId,
        result: Result<ImageData, Error>,
    },
    ResetView,
    ExportRequested,
    ExportCompleted(Result<PathBuf, Error>),
}

/// Side effects the application should perform after handling a viewer message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// The view changed in a way the window title reflects.
    TitleChanged,
    /// A new image finished loading.
    ImageReady(NaturalSize),
    /// An export was written.
    Exported(PathBuf),
}

/// Presentation and export settings handed to the viewer at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSettings {
    /// Fixed viewport size; `None` fills the available space.
    pub fixed_size: Option<(f32, f32)>,
    pub show_grid: bool,
    /// Re-clamp the pan offset after each zoom step.
    pub clamp_on_zoom: bool,
    pub export_format: ExportFormat,
    pub export_dir: PathBuf,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            fixed_size: None,
            show_grid: true,
            clamp_on_zoom: false,
            export_format: ExportFormat::default(),
            export_dir: PathBuf::from("."),
        }
    }
}

/// Complete viewer state.
#[derive(Debug, Clone)]
pub struct State {
    viewport: ViewportState,
    image: Option<ImageData>,
    bounds: Option<Rectangle>,
    hovered: bool,
    settings: ViewerSettings,
    export_pending: bool,
    /// Outcome of the last export, shown in the status line.
    export_status: Option<String>,
}

impl Default for State {
    fn default() -> Self {
        Self::new(ZoomConfig::default(), ViewerSettings::default())
    }
}

impl State {
    #[must_use]
    pub fn new(zoom: ZoomConfig, settings: ViewerSettings) -> Self {
        Self {
            viewport: ViewportState::new(zoom),
            image: None,
            bounds: None,
            hovered: false,
            settings,
            export_pending: false,
            export_status: None,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Short description of the current image for the window title.
    #[must_use]
    pub fn title_fragment(&self) -> Option<String> {
        let source = self.viewport.source.as_ref()?;
        Some(format!("{} ({})", source, self.viewport.zoom.label()))
    }

    /// Starts loading `source`, superseding any in-flight load.
    pub fn load(&mut self, source: ImageSource) -> Task<Message> {
        let request = self.viewport.load_image(source);
        let id = request.id;
        if request.source.is_remote() {
            log::info!("fetching {} as request #{}", request.source, id.value());
        } else {
            log::debug!("loading {} as request #{}", request.source, id.value());
        }
        Task::perform(media::load_source(request.source), move |result| {
            Message::ImageLoaded { id, result }
        })
    }

    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::LayoutMeasured(bounds) => {
                self.bounds = Some(bounds);
                (Effect::None, Task::none())
            }
            Message::PointerPressed { position, bounds } => {
                self.bounds = Some(bounds);
                self.viewport.begin_drag(position);
                (Effect::None, Task::none())
            }
            Message::PointerMoved { position, over } => {
                self.hovered = over;
                self.viewport.update_drag(position);
                (Effect::None, Task::none())
            }
            Message::PointerReleased { bounds } => {
                self.bounds = Some(bounds);
                let layout = MeasuredLayout::new(&self.viewport, bounds);
                let measured = FixedLayout::snapshot(&layout);
                self.viewport.end_drag_measured(&measured);
                (Effect::None, Task::none())
            }
            Message::CursorLeft => {
                self.hovered = false;
                (Effect::None, Task::none())
            }
            Message::WheelScrolled { delta_y, bounds } => {
                self.bounds = Some(bounds);
                if !self.viewport.apply_wheel(delta_y) {
                    return (Effect::None, Task::none());
                }
                if self.settings.clamp_on_zoom {
                    self.viewport.clamp_to(bounds);
                }
                (Effect::TitleChanged, Task::none())
            }
            Message::LoadSource(source) => (Effect::TitleChanged, self.load(source)),
            Message::ImageLoaded { id, result } => self.handle_image_loaded(id, result),
            Message::ResetView => {
                self.viewport.reset_view();
                (Effect::TitleChanged, Task::none())
            }
            Message::ExportRequested => (Effect::None, self.start_export()),
            Message::ExportCompleted(result) => {
                self.export_pending = false;
                match result {
                    Ok(path) => {
                        self.export_status = Some(format!("Saved {}", path.display()));
                        (Effect::Exported(path), Task::none())
                    }
                    Err(err) => {
                        log::warn!("export failed: {err}");
                        self.export_status = Some(err.to_string());
                        (Effect::None, Task::none())
                    }
                }
            }
        }
    }

    fn handle_image_loaded(
        &mut self,
        id: RequestId,
        result: Result<ImageData, Error>,
    ) -> (Effect, Task<Message>) {
        let (size, data) = match result {
            Ok(data) => (Ok(data.natural_size()), Some(data)),
            Err(err) => (Err(err.to_string()), None),
        };

        if self.viewport.on_image_loaded(id, size) == LoadOutcome::Stale {
            return (Effect::None, Task::none());
        }
        // The last export's outcome belongs to the previous image
        self.export_status = None;

        match data {
            Some(data) => {
                let natural = data.natural_size();
                log::info!("image loaded: {}x{}", natural.width, natural.height);
                self.image = Some(data);
                (Effect::ImageReady(natural), Task::none())
            }
            None => {
                if let LoadStatus::Failed(message) = &self.viewport.status {
                    log::warn!("image load failed: {message}");
                }
                (Effect::TitleChanged, Task::none())
            }
        }
    }

    /// Captures the current geometry and exports it in the background.
    fn start_export(&mut self) -> Task<Message> {
        if self.export_pending {
            return Task::none();
        }
        let (Some(source), Some(container)) = (self.viewport.source.clone(), self.bounds) else {
            self.export_status = Some(Error::from(ExportError::ImageNotReady).to_string());
            return Task::none();
        };

        let request = ExportRequest {
            source,
            container,
            zoom: self.viewport.zoom.factor(),
            offset: self.viewport.offset,
            format: self.settings.export_format,
        };
        let sink = DirectorySink::new(self.settings.export_dir.clone());
        log::debug!("exporting {} into {}", request.source, sink.directory().display());

        self.export_pending = true;
        self.export_status = Some("Exporting...".to_string());
        Task::perform(media::run_export(request, sink), Message::ExportCompleted)
    }

    /// Text for the status line below the viewport.
    #[must_use]
    pub fn status_text(&self) -> String {
        match &self.viewport.status {
            LoadStatus::Idle => "No image".to_string(),
            LoadStatus::Loading(_) => match &self.viewport.source {
                Some(source) => format!("Loading {source}..."),
                None => "Loading...".to_string(),
            },
            LoadStatus::Failed(message) => format!("Failed to load image: {message}"),
            LoadStatus::Ready => self.export_status.clone().unwrap_or_else(|| {
                let size = self.viewport.natural_size;
                format!("{} x {}", size.width, size.height)
            }),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let (width, height) = match self.settings.fixed_size {
            Some((w, h)) => (Length::Fixed(w), Length::Fixed(h)),
            None => (Length::Fill, Length::Fill),
        };

        let program = ViewportCanvas {
            viewport: &self.viewport,
            image: self.image.as_ref().map(|data| &data.handle),
            known_bounds: self.bounds,
            hovered: self.hovered,
            show_grid: self.settings.show_grid,
        };
        let viewport = Container::new(canvas(program).width(width).height(height)).clip(true);

        let can_export = self.viewport.source.is_some() && !self.export_pending;
        let export_button = button(Text::new("Export crop"))
            .on_press_maybe(can_export.then_some(Message::ExportRequested));
        let reset_button = button(Text::new("Reset")).on_press(Message::ResetView);

        let toolbar = Row::new()
            .spacing(8.0)
            .align_y(alignment::Vertical::Center)
            .push(export_button)
            .push(reset_button)
            .push(Text::new(self.viewport.zoom.label()))
            .push(Text::new(self.status_text()).size(13.0));

        Column::new()
            .spacing(8.0)
            .padding(8.0)
            .push(viewport)
            .push(toolbar)
            .into()
    }
}
