// SPDX-License-Identifier: MPL-2.0
//! Image acquisition and crop export.
//!
//! Loading covers local files and `http(s)` URLs, raster formats and SVG.
//! Export re-fetches the source and writes the visible region to disk.

pub mod export;
pub mod image;
pub mod loader;

pub use export::{run_export, DirectorySink, ExportFormat, ExportRequest, ExportSink};
pub use image::{load_image, load_source, ImageData};
pub use loader::{LoadRequest, LoadTracker, RequestId};

/// Supported image extensions for local files.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "tiff", "tif", "webp", "bmp", "ico", "svg",
];

/// Returns true if the path has a known image extension.
#[must_use]
pub fn has_image_extension<P: AsRef<std::path::Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_are_case_insensitive() {
        assert!(has_image_extension("photo.JPG"));
        assert!(has_image_extension("/tmp/graphic.svg"));
        assert!(!has_image_extension("document.pdf"));
        assert!(!has_image_extension("no_extension"));
    }
}
