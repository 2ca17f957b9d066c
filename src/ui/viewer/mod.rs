// SPDX-License-Identifier: MPL-2.0
//! Image viewer: the component owning pan/zoom/export state and the canvas
//! that paints it.

pub mod canvas;
pub mod component;

pub use component::{Effect, Message, State, ViewerSettings};
