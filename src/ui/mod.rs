// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Follows the Elm-style "state down, messages up" pattern.
//!
//! - [`state`] - Pan/zoom view state and its transitions
//! - [`geometry`] - Stateless layout math (rendered rect, clamp, crop mapping)
//! - [`viewer`] - The viewer component and its canvas

pub mod geometry;
pub mod state;
pub mod viewer;
