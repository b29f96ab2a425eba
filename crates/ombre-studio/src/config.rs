use ombre_core::EditPolicy;
use ombre_export::{SvgMode, SvgOptions};

use crate::cli::GlobalArgs;
use crate::logging::LoggingConfig;
use crate::theme::Theme;

pub const DEFAULT_PREVIEW_COLS: u32 = 40;

/// Session settings resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub theme: Theme,
    pub policy: EditPolicy,
    /// Size and mode used for `svg` exports. Raster export and the preview
    /// always render the native SVG.
    pub svg: SvgOptions,
    pub logging: LoggingConfig,
    /// Preview size in terminal cells; 0 columns disables it.
    pub preview_cols: u32,
    pub preview_rows: u32,
    /// Emit ANSI escapes (colors, screen clearing, preview).
    pub ansi: bool,
}

impl Default for StudioConfig {
    fn default() -> Self {
        let svg = SvgOptions::default();
        Self {
            theme: Theme::default(),
            policy: EditPolicy::default(),
            svg,
            logging: LoggingConfig::default(),
            preview_cols: DEFAULT_PREVIEW_COLS,
            preview_rows: preview_rows(DEFAULT_PREVIEW_COLS, &svg),
            ansi: true,
        }
    }
}

impl StudioConfig {
    pub fn from_args(args: &GlobalArgs) -> Self {
        let mut config = Self::default();

        if let Some(theme) = args.theme {
            config.theme = theme;
        }
        if args.strict {
            config.policy = EditPolicy::Strict;
        }
        if args.verbatim_svg {
            config.svg.mode = SvgMode::Verbatim;
        }
        if let Some(cols) = args.preview_width {
            config.preview_cols = cols;
            config.preview_rows = preview_rows(cols, &config.svg);
        }

        config.ansi = !args.no_color && console::colors_enabled();
        config.logging.env_filter = args.log.clone();
        if !config.ansi {
            config.logging.write_style = env_logger::WriteStyle::Never;
        }
        config
    }

    pub fn preview_enabled(&self) -> bool {
        self.ansi && self.preview_cols > 0 && self.preview_rows > 0
    }
}

/// Rows that keep the export aspect ratio; each cell holds two pixels
/// stacked vertically.
fn preview_rows(cols: u32, svg: &SvgOptions) -> u32 {
    if svg.width == 0 {
        return 0;
    }
    let rows = u64::from(cols) * u64::from(svg.height) / (2 * u64::from(svg.width));
    u32::try_from(rows).unwrap_or(u32::MAX).max(u32::from(cols > 0))
}
