// SPDX-License-Identifier: MPL-2.0
//! `iced_cropper` shows a single image inside a viewport where it can be
//! dragged and zoomed, then exports exactly the visible area as a new image.
//!
//! The viewport geometry lives in [`ui::state`] and [`ui::geometry`] and has
//! no dependency on a window, so it can be driven from tests or other front
//! ends. [`media::export`] turns a captured view into encoded pixels.

#![doc(html_root_url = "https://docs.rs/iced_cropper/0.1.0")]

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod media;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
