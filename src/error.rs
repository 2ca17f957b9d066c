// SPDX-License-Identifier: MPL-2.0
use crate::domain::error::ZoomConfigError;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Decode(String),
    Svg(String),
    Network(String),
    Config(String),
    Export(ExportError),
}

/// Specific reasons a crop export can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportError {
    /// The image has no natural size yet (still loading or failed).
    ImageNotReady,

    /// The measured geometry cannot be mapped back to image pixels
    /// (zero-sized image rectangle or container).
    DegenerateGeometry,

    /// The visible region does not overlap the image at all.
    EmptyRegion,

    /// The encoder rejected the pixel buffer.
    EncodingFailed(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::ImageNotReady => write!(f, "Image is not loaded yet"),
            ExportError::DegenerateGeometry => write!(f, "Viewport geometry is empty"),
            ExportError::EmptyRegion => write!(f, "Visible region does not overlap the image"),
            ExportError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::Svg(e) => write!(f, "SVG Error: {}", e),
            Error::Network(e) => write!(f, "Network Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Export(e) => write!(f, "Export Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ExportError> for Error {
    fn from(err: ExportError) -> Self {
        Error::Export(err)
    }
}

impl From<ZoomConfigError> for Error {
    fn from(err: ZoomConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        match err {
            image_rs::ImageError::IoError(io) => Error::Io(io.to_string()),
            other => Error::Decode(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
