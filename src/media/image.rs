// SPDX-License-Identifier: MPL-2.0
//! Image loading and decoding from local files or URLs (PNG, JPEG, GIF, SVG, etc.).

use crate::domain::media::{ImageSource, NaturalSize};
use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::{GenericImageView, RgbaImage};
use resvg::usvg;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// A decoded image: the GPU handle for drawing plus the raw pixels for export.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
    /// Decoded RGBA bytes, shared between clones of the message carrying them.
    rgba_bytes: Arc<Vec<u8>>,
}

impl ImageData {
    /// Wraps RGBA pixels. The handle receives its own copy.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let rgba_bytes = Arc::new(pixels);
        let handle = image::Handle::from_rgba(width, height, rgba_bytes.to_vec());
        Self {
            handle,
            width,
            height,
            rgba_bytes,
        }
    }

    /// Natural pixel size of the image.
    #[must_use]
    pub fn natural_size(&self) -> NaturalSize {
        NaturalSize::new(self.width, self.height)
    }

    /// Copies the pixels into an `RgbaImage` for processing.
    #[must_use]
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.rgba_bytes.to_vec())
    }
}

/// Reads and decodes a local file. `.svg` files go through resvg, everything
/// else through the `image` crate.
///
/// # Errors
///
/// [`Error::Io`] when the file is unreadable, [`Error::Decode`] for bad
/// raster data and [`Error::Svg`] for unparsable or empty SVG documents.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<ImageData> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let is_svg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        rasterize_svg(&bytes)
    } else {
        decode_bytes(&bytes)
    }
}

/// Decodes an in-memory image, falling back to SVG when the bytes look like
/// markup.
///
/// # Errors
///
/// Returns [`Error::Decode`] for unsupported raster data and [`Error::Svg`]
/// for broken SVG documents.
pub fn decode_bytes(bytes: &[u8]) -> Result<ImageData> {
    if looks_like_svg(bytes) {
        return rasterize_svg(bytes);
    }

    let img = image_rs::load_from_memory(bytes).map_err(|e| Error::Decode(e.to_string()))?;
    let (width, height) = img.dimensions();
    let pixels = img.to_rgba8().into_vec();

    Ok(ImageData::from_rgba(width, height, pixels))
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(256)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

fn rasterize_svg(svg_data: &[u8]) -> Result<ImageData> {
    let tree = usvg::Tree::from_data(svg_data, &usvg::Options::default())
        .map_err(|e| Error::Svg(e.to_string()))?;

    let pixmap_size = tree.size().to_int_size();
    let width = pixmap_size.width();
    let height = pixmap_size.height();
    if width == 0 || height == 0 {
        return Err(Error::Svg("SVG has empty dimensions".into()));
    }

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::Svg("Failed to allocate SVG pixmap".into()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    Ok(ImageData::from_rgba(width, height, pixmap.data().to_vec()))
}

/// Downloads the raw bytes behind a URL.
///
/// # Errors
///
/// Returns [`Error::Network`] on transport failures and non-success statuses.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::get(url).await?.error_for_status()?;
    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}

/// Resolves and decodes an image source.
///
/// Decoding runs on the blocking thread pool so the UI executor stays free.
///
/// # Errors
///
/// Propagates read, network and decode failures.
pub async fn load_source(source: ImageSource) -> Result<ImageData> {
    let decoded = match source {
        ImageSource::Path(path) => tokio::task::spawn_blocking(move || load_image(path)).await,
        ImageSource::Url(url) => {
            let bytes = fetch_bytes(&url).await?;
            tokio::task::spawn_blocking(move || decode_bytes(&bytes)).await
        }
    };
    decoded.map_err(|e| Error::Io(format!("Image decoding task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image_rs::{Rgba, RgbaImage};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_png_image_returns_expected_dimensions() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let image_path = temp_dir.path().join("sample.png");

        let image = RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]));
        image
            .save(&image_path)
            .expect("failed to write temporary png");

        let data = load_image(&image_path).expect("png should load successfully");
        assert_eq!(data.natural_size(), NaturalSize::new(4, 2));
        let pixels = data.to_rgba_image().expect("buffer matches dimensions");
        assert_eq!(pixels.as_raw().len(), 4 * 2 * 4);
    }

    #[test]
    fn load_svg_image_rasterizes_successfully() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let svg_path = temp_dir.path().join("sample.svg");
        let svg_content = r#"
            <svg xmlns="http://www.w3.org/2000/svg" width="6" height="3">
                <rect width="6" height="3" fill="blue" />
            </svg>
        "#;
        fs::write(&svg_path, svg_content.trim()).expect("failed to write svg");

        let data = load_image(&svg_path).expect("svg should load successfully");
        assert_eq!(data.width, 6);
        assert_eq!(data.height, 3);
    }

    #[test]
    fn decode_bytes_sniffs_svg_markup() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="5" height="7"></svg>"#;
        let data = decode_bytes(svg).expect("svg bytes should decode");
        assert_eq!(data.natural_size(), NaturalSize::new(5, 7));
    }

    #[test]
    fn load_missing_image_returns_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let missing_path = temp_dir.path().join("does_not_exist.png");

        match load_image(&missing_path) {
            Err(Error::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn load_invalid_png_bytes_returns_decode_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let bad_path = temp_dir.path().join("invalid.png");
        fs::write(&bad_path, b"not a png").expect("failed to write invalid data");

        match load_image(&bad_path) {
            Err(Error::Decode(message)) => assert!(!message.is_empty()),
            other => panic!("expected Decode error for invalid png, got {other:?}"),
        }
    }

    #[test]
    fn load_svg_with_zero_dimensions_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let svg_path = temp_dir.path().join("zero.svg");
        let svg = r"<svg xmlns='http://www.w3.org/2000/svg' width='0' height='10'></svg>";
        fs::write(&svg_path, svg).expect("write svg");

        match load_image(&svg_path) {
            Err(Error::Svg(_)) => {}
            other => panic!("expected Svg error, got {other:?}"),
        }
    }

    #[test]
    fn to_rgba_image_round_trips_pixels() {
        let data = ImageData::from_rgba(1, 1, vec![1, 2, 3, 4]);
        let image = data.to_rgba_image().expect("valid buffer");
        assert_eq!(image.get_pixel(0, 0), &Rgba([1, 2, 3, 4]));
    }

    #[tokio::test]
    async fn load_source_reads_local_paths() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let image_path = temp_dir.path().join("async.png");
        RgbaImage::from_pixel(3, 5, Rgba([0, 0, 0, 255]))
            .save(&image_path)
            .expect("write png");

        let data = load_source(ImageSource::Path(image_path))
            .await
            .expect("local load");
        assert_eq!(data.natural_size(), NaturalSize::new(3, 5));
    }
}
