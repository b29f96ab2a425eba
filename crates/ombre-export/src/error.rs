use std::path::PathBuf;

use thiserror::Error;

/// Failures from the clipboard, SVG and raster exporters.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("could not parse generated SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid raster size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("no image encoder for {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
