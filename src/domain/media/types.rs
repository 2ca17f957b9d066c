// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent pure data without any presentation dependencies.

use std::fmt;
use std::path::PathBuf;

/// Natural (intrinsic) pixel dimensions of a decoded image.
///
/// Set once per successful load; the zero size means "nothing loaded yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct NaturalSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl NaturalSize {
    /// Creates a new size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either dimension is zero.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns true if the image is at least as wide as it is tall.
    #[must_use]
    pub fn is_landscape(self) -> bool {
        self.width >= self.height
    }

    /// Returns `width / height`, or `None` for an empty size.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(self) -> Option<f32> {
        if self.is_empty() {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }
}

/// String locator of the image to display.
///
/// `http://` and `https://` locators are fetched over the network, anything
/// else is treated as a local file path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageSource {
    /// Local file.
    Path(PathBuf),
    /// Remote resource.
    Url(String),
}

impl ImageSource {
    /// Classifies a raw locator.
    #[must_use]
    pub fn parse(locator: &str) -> Self {
        let trimmed = locator.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageSource::Url(trimmed.to_string())
        } else {
            ImageSource::Path(PathBuf::from(trimmed))
        }
    }

    /// Returns true if the source must be fetched over the network.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, ImageSource::Url(_))
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => write!(f, "{}", path.display()),
            ImageSource::Url(url) => write!(f, "{url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_size_default_is_empty() {
        assert!(NaturalSize::default().is_empty());
        assert!(NaturalSize::new(10, 0).is_empty());
        assert!(!NaturalSize::new(1, 1).is_empty());
    }

    #[test]
    fn aspect_ratio_of_empty_size_is_none() {
        assert!(NaturalSize::default().aspect_ratio().is_none());
    }

    #[test]
    fn aspect_ratio_divides_width_by_height() {
        let ratio = NaturalSize::new(800, 400).aspect_ratio().expect("non-empty");
        assert!((ratio - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn square_counts_as_landscape() {
        assert!(NaturalSize::new(5, 5).is_landscape());
        assert!(!NaturalSize::new(4, 5).is_landscape());
    }

    #[test]
    fn parse_detects_urls_case_insensitively() {
        assert_eq!(
            ImageSource::parse("HTTPS://example.com/tree.jpg"),
            ImageSource::Url("HTTPS://example.com/tree.jpg".to_string())
        );
        assert!(ImageSource::parse("http://example.com/a.png").is_remote());
    }

    #[test]
    fn parse_treats_other_locators_as_paths() {
        assert_eq!(
            ImageSource::parse(" images/tree.jpg "),
            ImageSource::Path(PathBuf::from("images/tree.jpg"))
        );
        assert!(!ImageSource::parse("file.png").is_remote());
    }

    #[test]
    fn display_shows_locator() {
        assert_eq!(
            ImageSource::parse("https://example.com/a.png").to_string(),
            "https://example.com/a.png"
        );
    }
}
