//! Export paths for Ombre gradients.
//!
//! | Module | Output |
//! |--------|--------|
//! | [`clipboard`] | `background: <css>;` on the system clipboard |
//! | [`svg`] | SVG document, verbatim or native paint |
//! | [`raster`] | PNG/JPEG/… via `resvg` and `image` |

pub mod clipboard;
pub mod error;
pub mod raster;
pub mod svg;

pub use clipboard::{ClipboardSink, MemoryClipboard, SystemClipboard, copy_css};
pub use error::ExportError;
pub use raster::{DEFAULT_RASTER_NAME, rasterize, save_raster, to_image};
pub use svg::{DEFAULT_SVG_NAME, SvgMode, SvgOptions, render_svg, save_svg};
