// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value objects with ZERO external dependencies.
//!
//! This module contains pure domain types and the rules that keep them valid.
//! It has no dependencies on external crates (except `std`) so the pan/zoom
//! logic built on top of it can be tested without a display surface.
//!
//! # Modules
//!
//! - [`error`]: Domain error types ([`ZoomConfigError`](error::ZoomConfigError))
//! - [`media`]: Media types ([`NaturalSize`](media::NaturalSize),
//!   [`ImageSource`](media::ImageSource))
//! - [`ui`]: UI value objects ([`ZoomFactor`](ui::newtypes::ZoomFactor),
//!   [`ZoomConfig`](ui::newtypes::ZoomConfig))

pub mod error;
pub mod media;
pub mod ui;
