// SPDX-License-Identifier: MPL-2.0
//! Helpers shared by unit tests.
//!
//! Float comparisons go through `approx`; `assert_eq!` on viewport offsets
//! and zoom factors is too brittle once arithmetic is involved.

pub use approx::assert_abs_diff_eq;
