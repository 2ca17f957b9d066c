// SPDX-License-Identifier: MPL-2.0
//! Application root state.
//!
//! The `App` struct wires configuration and CLI flags into the viewer and
//! translates viewer effects into window-level behavior.

mod message;
pub mod paths;

pub use message::{Flags, Message};

use crate::config::{self, Config, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::domain::media::ImageSource;
use crate::media;
use crate::ui::viewer::{Effect, State as ViewerState, ViewerSettings};
use iced::{window, Element, Size, Task, Theme};
use std::fmt;

const APP_NAME: &str = "Iced Cropper";

/// Space reserved below a fixed viewport for the toolbar.
const TOOLBAR_HEIGHT: f32 = 56.0;

/// Padding around the viewer column, on each side.
const WINDOW_PADDING: f32 = 8.0;

/// Root Iced application state.
pub struct App {
    viewer: ViewerState,
    /// Warning raised while reading settings, logged once at startup.
    config_warning: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("viewer_has_image", &self.viewer.has_image())
            .field("config_warning", &self.config_warning)
            .finish()
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            viewer: ViewerState::default(),
            config_warning: None,
        }
    }
}

/// Builds viewer settings from the config file and CLI flags.
///
/// CLI sizes win over the config file; both must be present for the
/// viewport to be fixed.
#[must_use]
pub fn viewer_settings(config: &Config, flags: &Flags) -> ViewerSettings {
    let mut merged = config.clone();
    if flags.width.is_some() {
        merged.viewport.width = flags.width;
    }
    if flags.height.is_some() {
        merged.viewport.height = flags.height;
    }

    ViewerSettings {
        fixed_size: merged.fixed_viewport(),
        show_grid: config.viewport.show_grid,
        clamp_on_zoom: config.zoom.clamp_on_zoom,
        export_format: config.export.format,
        export_dir: paths::get_export_dir(config.export.directory.clone()),
    }
}

/// Window settings sized around a fixed viewport, if any.
#[must_use]
pub fn window_settings(fixed_size: Option<(f32, f32)>) -> window::Settings {
    let size = match fixed_size {
        Some((width, height)) => Size::new(
            width + 2.0 * WINDOW_PADDING,
            height + TOOLBAR_HEIGHT + 2.0 * WINDOW_PADDING,
        ),
        None => Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
    };

    window::Settings {
        size,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    paths::init_cli_overrides(flags.config_dir.clone(), flags.export_dir.clone());
    let (config, config_warning) = config::load();
    let window = window_settings(viewer_settings(&config, &flags).fixed_size);

    // Wrap boot state in RefCell<Option<_>> to satisfy the Fn bound while
    // only consuming it once
    let boot_state = RefCell::new(Some((flags, config, config_warning)));
    let boot = move || match boot_state.borrow_mut().take() {
        Some((flags, config, warning)) => App::new(&flags, &config, warning),
        None => (App::default(), Task::none()),
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window)
        .run()
}

impl App {
    /// Initializes application state and kicks off loading the startup image.
    fn new(
        flags: &Flags,
        config: &Config,
        config_warning: Option<String>,
    ) -> (Self, Task<Message>) {
        if let Some(warning) = &config_warning {
            log::warn!("settings could not be read ({warning}), using defaults");
        }

        let (zoom, zoom_warning) = config.zoom_config();
        log::debug!(
            "zoom {}x..{}x in steps of {}",
            zoom.min_zoom(),
            zoom.max_zoom(),
            zoom.zoom_step()
        );
        let settings = viewer_settings(config, flags);
        log::debug!("viewer settings: {settings:?}");

        let mut app = App {
            viewer: ViewerState::new(zoom, settings),
            config_warning: config_warning.or(zoom_warning),
        };

        let task = match flags.image.as_deref() {
            Some(locator) => {
                let source = ImageSource::parse(locator);
                if let ImageSource::Path(path) = &source {
                    if !media::has_image_extension(path) {
                        log::warn!("{} has no known image extension", path.display());
                    }
                }
                app.viewer.load(source).map(Message::Viewer)
            }
            None => Task::none(),
        };

        (app, task)
    }

    fn title(&self) -> String {
        match self.viewer.title_fragment() {
            Some(fragment) => format!("{fragment} - {APP_NAME}"),
            None => APP_NAME.to_string(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Viewer(viewer_message) => {
                let (effect, task) = self.viewer.handle_message(viewer_message);
                match effect {
                    Effect::Exported(path) => {
                        log::info!("crop exported to {}", path.display());
                    }
                    Effect::ImageReady(size) => {
                        log::debug!("viewer ready at {}x{}", size.width, size.height);
                    }
                    Effect::TitleChanged | Effect::None => {}
                }
                task.map(Message::Viewer)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        self.viewer.view().map(Message::Viewer)
    }
}
