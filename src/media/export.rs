// SPDX-License-Identifier: MPL-2.0
//! Crop export: renders the visible viewport region at viewport resolution,
//! encodes it and hands it to a delivery sink.
//!
//! The source image is always fetched again at export time; the geometry
//! captured when the export was triggered is then mapped onto the freshly
//! decoded pixels.

use crate::domain::media::{ImageSource, NaturalSize};
use crate::domain::ui::ZoomFactor;
use crate::error::{Error, ExportError, Result};
use crate::media::image::load_source;
use crate::ui::geometry::{self, CropRegion, FixedLayout};
use iced::{Rectangle, Vector};
use image_rs::{imageops, ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PNG format (lossless, best quality).
    #[default]
    Png,
    /// JPEG format (lossy, smaller file size).
    Jpeg,
    /// WebP format.
    WebP,
}

impl ExportFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::WebP => "webp",
        }
    }

    /// Returns the image format for the `image` crate.
    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
            ExportFormat::WebP => ImageFormat::WebP,
        }
    }
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn unix_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Suggested name for an export: `image_<unix_millis>.<ext>`.
#[must_use]
pub fn export_filename(millis: i64, format: ExportFormat) -> String {
    format!("image_{}.{}", millis, format.extension())
}

/// Draws `region.source` of `image` into a new buffer of `region.destination`
/// pixels.
///
/// Parts of the source rectangle that fall outside the image are clipped and
/// the matching destination area stays transparent.
///
/// # Errors
///
/// Returns [`ExportError::EmptyRegion`] when the source rectangle does not
/// overlap the image.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn render_crop(image: &RgbaImage, region: &CropRegion) -> Result<RgbaImage> {
    let src = region.source;
    let dest_w = region.destination.width;
    let dest_h = region.destination.height;
    let mut canvas = RgbaImage::new(dest_w, dest_h);

    if src.width <= 0.0 || src.height <= 0.0 {
        return Err(ExportError::EmptyRegion.into());
    }

    let (img_w, img_h) = (image.width() as f32, image.height() as f32);
    let clip_x0 = src.x.max(0.0);
    let clip_y0 = src.y.max(0.0);
    let clip_x1 = (src.x + src.width).min(img_w);
    let clip_y1 = (src.y + src.height).min(img_h);
    if clip_x1 <= clip_x0 || clip_y1 <= clip_y0 {
        return Err(ExportError::EmptyRegion.into());
    }

    let scale_x = dest_w as f32 / src.width;
    let scale_y = dest_h as f32 / src.height;

    // Whole source pixels covering the clipped area
    let px0 = clip_x0.floor() as u32;
    let py0 = clip_y0.floor() as u32;
    let px1 = (clip_x1.ceil() as u32).min(image.width());
    let py1 = (clip_y1.ceil() as u32).min(image.height());
    let cropped = imageops::crop_imm(image, px0, py0, px1 - px0, py1 - py0).to_image();

    let dx0 = ((clip_x0 - src.x) * scale_x).round() as i64;
    let dy0 = ((clip_y0 - src.y) * scale_y).round() as i64;
    let dx1 = ((clip_x1 - src.x) * scale_x).round().min(dest_w as f32) as i64;
    let dy1 = ((clip_y1 - src.y) * scale_y).round().min(dest_h as f32) as i64;
    let target_w = (dx1 - dx0).max(1) as u32;
    let target_h = (dy1 - dy0).max(1) as u32;

    let scaled = if cropped.dimensions() == (target_w, target_h) {
        cropped
    } else {
        imageops::resize(&cropped, target_w, target_h, imageops::FilterType::Triangle)
    };

    imageops::replace(&mut canvas, &scaled, dx0, dy0);
    Ok(canvas)
}

/// Encodes the rendered crop.
///
/// # Errors
///
/// Returns [`ExportError::EncodingFailed`] if the encoder rejects the buffer.
pub fn encode(image: &RgbaImage, format: ExportFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let result = if format == ExportFormat::Jpeg {
        // JPEG doesn't support alpha
        image_rs::DynamicImage::ImageRgba8(image.clone())
            .to_rgb8()
            .write_to(&mut Cursor::new(&mut bytes), format.image_format())
    } else {
        image.write_to(&mut Cursor::new(&mut bytes), format.image_format())
    };
    result.map_err(|e| Error::from(ExportError::EncodingFailed(e.to_string())))?;
    Ok(bytes)
}

/// Receives finished exports, standing in for the platform download.
pub trait ExportSink {
    /// Stores `bytes` under (a variant of) `filename` and returns where it went.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn deliver(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Upper bound on `-N` suffixes tried before giving up.
const MAX_NAME_ATTEMPTS: u32 = 10_000;

/// Writes exports into a directory, never overwriting an existing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// `filename` itself, then `stem-1.ext`, `stem-2.ext`, ...
    fn candidate(&self, filename: &str, attempt: u32) -> PathBuf {
        if attempt == 0 {
            return self.directory.join(filename);
        }
        let path = Path::new(filename);
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("image");
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("png");
        self.directory.join(format!("{stem}-{attempt}.{ext}"))
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory)?;

        // create_new makes claiming a name atomic, so concurrent exports
        // cannot land on the same file
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = self.candidate(filename, attempt);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(bytes)?;
                    return Ok(path);
                }
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {}
                Err(err) => return Err(err.into()),
            }
        }

        Err(Error::Io(format!(
            "no free file name for {filename} in {}",
            self.directory.display()
        )))
    }
}

/// View state captured when the user asks for an export.
///
/// The image rectangle is not stored: it is derived again from the natural
/// size of the re-fetched image, so an export triggered before the first load
/// finished still maps onto real pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub source: ImageSource,
    pub container: Rectangle,
    pub zoom: ZoomFactor,
    pub offset: Vector,
    pub format: ExportFormat,
}

impl ExportRequest {
    /// Layout the view had, replayed for an image of `natural` size.
    #[must_use]
    pub fn layout(&self, natural: NaturalSize) -> FixedLayout {
        FixedLayout {
            container: self.container,
            image: geometry::rendered_image_rect(natural, self.zoom, self.offset, self.container),
        }
    }
}

/// Renders and encodes an export from already decoded pixels.
///
/// # Errors
///
/// Fails if the geometry is degenerate, the region misses the image or the
/// encoder fails.
pub fn export_pixels(pixels: &RgbaImage, request: &ExportRequest) -> Result<Vec<u8>> {
    let natural = NaturalSize::new(pixels.width(), pixels.height());
    let region = geometry::crop_region_measured(natural, &request.layout(natural))
        .ok_or(ExportError::DegenerateGeometry)?;
    let rendered = render_crop(pixels, &region)?;
    encode(&rendered, request.format)
}

/// Re-fetches the source, crops it and delivers the file.
///
/// # Errors
///
/// Every failure (reload, geometry, encoding, delivery) is returned to the
/// caller.
pub async fn run_export<S>(request: ExportRequest, sink: S) -> Result<PathBuf>
where
    S: ExportSink + Send + 'static,
{
    let data = load_source(request.source.clone()).await?;

    tokio::task::spawn_blocking(move || -> Result<PathBuf> {
        let pixels = data.to_rgba_image().ok_or(ExportError::ImageNotReady)?;
        let bytes = export_pixels(&pixels, &request)?;
        let filename = export_filename(unix_millis(), request.format);
        let path = sink.deliver(&filename, &bytes)?;
        log::info!("exported {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    })
    .await
    .map_err(|e| Error::Io(format!("Export task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use iced::{Point, Size};
    use image_rs::Rgba;
    use tempfile::tempdir;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn region(x: f32, y: f32, w: f32, h: f32, dw: u32, dh: u32) -> CropRegion {
        CropRegion {
            source: Rectangle::new(Point::new(x, y), Size::new(w, h)),
            destination: Size::new(dw, dh),
        }
    }

    #[test]
    fn export_format_extensions() {
        assert_eq!(ExportFormat::Png.extension(), "png");
        assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
        assert_eq!(ExportFormat::WebP.extension(), "webp");
    }

    #[test]
    fn export_filename_uses_timestamp() {
        assert_eq!(
            export_filename(1_700_000_000_123, ExportFormat::Png),
            "image_1700000000123.png"
        );
    }

    #[test]
    fn full_region_copies_pixels_one_to_one() {
        let mut image = RgbaImage::from_pixel(4, 2, RED);
        image.put_pixel(3, 1, Rgba([0, 0, 255, 255]));

        let out = render_crop(&image, &region(0.0, 0.0, 4.0, 2.0, 4, 2)).expect("render");
        assert_eq!(out, image);
    }

    #[test]
    fn region_past_the_edge_leaves_transparent_background() {
        let image = RgbaImage::from_pixel(10, 10, RED);
        let out = render_crop(&image, &region(5.0, 0.0, 10.0, 10.0, 10, 10)).expect("render");

        assert_eq!(out.dimensions(), (10, 10));
        assert_eq!(out.get_pixel(2, 2), &RED);
        assert_eq!(out.get_pixel(7, 2)[3], 0);
    }

    #[test]
    fn region_is_scaled_to_destination() {
        let image = RgbaImage::from_pixel(100, 50, RED);
        let out = render_crop(&image, &region(0.0, 0.0, 100.0, 50.0, 40, 20)).expect("render");
        assert_eq!(out.dimensions(), (40, 20));
        let pixel = out.get_pixel(20, 10);
        assert!(pixel[0] >= 250 && pixel[3] >= 250);
    }

    #[test]
    fn region_outside_image_is_an_error() {
        let image = RgbaImage::from_pixel(10, 10, RED);
        let err = render_crop(&image, &region(20.0, 20.0, 5.0, 5.0, 5, 5)).unwrap_err();
        assert!(matches!(err, Error::Export(ExportError::EmptyRegion)));
    }

    #[test]
    fn encode_png_produces_png_signature() {
        let image = RgbaImage::from_pixel(2, 2, RED);
        let bytes = encode(&image, ExportFormat::Png).expect("encode");
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn encode_jpeg_drops_alpha() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 0]));
        let bytes = encode(&image, ExportFormat::Jpeg).expect("encode");
        assert_eq!(&bytes[..2], b"\xFF\xD8");
    }

    #[test]
    fn directory_sink_never_overwrites() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let sink = DirectorySink::new(temp_dir.path().join("out"));

        let first = sink.deliver("image_1.png", b"a").expect("first write");
        let second = sink.deliver("image_1.png", b"b").expect("second write");

        assert_ne!(first, second);
        assert_eq!(second.file_name().and_then(|n| n.to_str()), Some("image_1-1.png"));
        assert_eq!(fs::read(&first).expect("read"), b"a");
    }

    #[test]
    fn directory_sink_parallel_deliveries_get_distinct_files() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let sink = DirectorySink::new(temp_dir.path());

        let written: Vec<(PathBuf, Vec<u8>)> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8u8)
                .map(|i| {
                    let sink = &sink;
                    scope.spawn(move || {
                        let bytes = vec![i; 16];
                        let path = sink.deliver("image_42.png", &bytes).expect("write");
                        (path, bytes)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("writer thread"))
                .collect()
        });

        let mut paths: Vec<_> = written.iter().map(|(p, _)| p.clone()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 8);
        for (path, bytes) in &written {
            assert_eq!(&fs::read(path).expect("read"), bytes);
        }
    }

    #[test]
    fn export_layout_is_replayed_for_fresh_natural_size() {
        let request = ExportRequest {
            source: ImageSource::parse("unused.png"),
            container: Rectangle::new(Point::new(10.0, 20.0), Size::new(400.0, 300.0)),
            zoom: ZoomFactor::ONE,
            offset: Vector::new(15.0, 0.0),
            format: ExportFormat::Png,
        };

        let layout = request.layout(NaturalSize::new(800, 600));
        assert_eq!(layout.container, request.container);
        assert_abs_diff_eq!(layout.image.x, 25.0, epsilon = 1e-3);
        assert_abs_diff_eq!(layout.image.y, 20.0, epsilon = 1e-3);
        assert_abs_diff_eq!(layout.image.width, 400.0, epsilon = 1e-3);
        assert_abs_diff_eq!(layout.image.height, 300.0, epsilon = 1e-3);
    }

    #[test]
    fn export_pixels_rejects_degenerate_geometry() {
        let pixels = RgbaImage::from_pixel(4, 4, RED);
        let request = ExportRequest {
            source: ImageSource::parse("unused.png"),
            container: Rectangle::new(Point::ORIGIN, Size::new(0.0, 10.0)),
            zoom: ZoomFactor::ONE,
            offset: Vector::new(0.0, 0.0),
            format: ExportFormat::Png,
        };
        let err = export_pixels(&pixels, &request).unwrap_err();
        assert!(matches!(err, Error::Export(ExportError::DegenerateGeometry)));
    }

    #[test]
    fn export_pixels_follows_zoom_and_pan() {
        // Left half red, right half blue
        let mut pixels = RgbaImage::from_pixel(8, 6, RED);
        for x in 4..8 {
            for y in 0..6 {
                pixels.put_pixel(x, y, Rgba([0, 0, 255, 255]));
            }
        }
        // Zoom 2 renders 8x6 in a 4x3 container; pan fully left shows the right half
        let request = ExportRequest {
            source: ImageSource::parse("unused.png"),
            container: Rectangle::new(Point::ORIGIN, Size::new(4.0, 3.0)),
            zoom: crate::domain::ui::ZoomConfig::new(1.0, 1.0, 2.0)
                .expect("valid config")
                .factor_at(1),
            offset: Vector::new(-2.0, 0.0),
            format: ExportFormat::Png,
        };

        let bytes = export_pixels(&pixels, &request).expect("export");
        let out = image_rs::load_from_memory(&bytes).expect("decode").to_rgba8();
        assert_eq!(out.dimensions(), (4, 3));
        assert!(out.pixels().all(|p| *p == Rgba([0, 0, 255, 255])));
    }

    #[tokio::test]
    async fn run_export_reloads_source_and_writes_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let source_path = temp_dir.path().join("source.png");
        RgbaImage::from_pixel(8, 6, RED)
            .save(&source_path)
            .expect("write png");

        // 8x6 fitted into 4x3 fills the container exactly
        let request = ExportRequest {
            source: ImageSource::Path(source_path),
            container: Rectangle::new(Point::new(0.0, 0.0), Size::new(4.0, 3.0)),
            zoom: ZoomFactor::ONE,
            offset: Vector::new(0.0, 0.0),
            format: ExportFormat::Png,
        };
        let sink = DirectorySink::new(temp_dir.path().join("downloads"));

        let path = run_export(request, sink).await.expect("export");
        let written = image_rs::open(&path).expect("decode export").to_rgba8();
        assert_eq!(written.dimensions(), (4, 3));
        assert!(path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("image_") && n.ends_with(".png")));
    }

    #[tokio::test]
    async fn run_export_reports_missing_source() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let request = ExportRequest {
            source: ImageSource::Path(temp_dir.path().join("gone.png")),
            container: Rectangle::new(Point::new(0.0, 0.0), Size::new(4.0, 3.0)),
            zoom: ZoomFactor::ONE,
            offset: Vector::new(0.0, 0.0),
            format: ExportFormat::Png,
        };

        let result = run_export(request, DirectorySink::new(temp_dir.path())).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
