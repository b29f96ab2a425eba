//! Raster export: SVG → pixels through `resvg`, pixels → file through `image`.

use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;

use crate::error::ExportError;

pub const DEFAULT_RASTER_NAME: &str = "gradient.png";

/// Renders `svg` into a `width × height` pixmap, scaling the document to fit.
///
/// Pixels are premultiplied RGBA.
pub fn rasterize(svg: &str, width: u32, height: u32) -> Result<Pixmap, ExportError> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())?;
    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::InvalidSize { width, height })?;

    let size = tree.size();
    let transform = Transform::from_scale(width as f32 / size.width(), height as f32 / size.height());
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Straight-alpha copy of `pixmap`.
pub fn to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

/// Rasterizes `svg` and writes it to `path`; the format follows the file
/// extension.
pub fn save_raster(path: &Path, svg: &str, width: u32, height: u32) -> Result<(), ExportError> {
    let format = ImageFormat::from_path(path)
        .ok()
        .filter(|f| f.writing_enabled())
        .ok_or_else(|| ExportError::UnsupportedFormat(path.to_path_buf()))?;

    let img = DynamicImage::ImageRgba8(to_image(&rasterize(svg, width, height)?));
    let img = match format {
        // No alpha channel in JPEG.
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => img,
    };
    img.save_with_format(path, format)?;
    log::info!("wrote {} ({width}x{height}, {format:?})", path.display());
    Ok(())
}
