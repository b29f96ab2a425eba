//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ombre_core::model::DEFAULT_ANGLE;
use ombre_core::{ColorStop, EditPolicy, GradientKind, GradientModel, ValidationError};
use ombre_export::{DEFAULT_RASTER_NAME, DEFAULT_SVG_NAME};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::theme::Theme;

/// Build CSS gradients from color stops and export them as CSS, SVG or images.
///
/// Without a subcommand the interactive studio starts.
#[derive(Parser, Debug)]
#[command(name = "ombre")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub task: Option<Task>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Color theme for the studio.
    #[arg(long, global = true, value_enum, env = "OMBRE_THEME")]
    pub theme: Option<Theme>,

    /// Log filter (env_logger syntax). Falls back to RUST_LOG.
    #[arg(long = "log", global = true, value_name = "FILTER", env = "OMBRE_LOG")]
    pub log: Option<String>,

    /// Reject malformed colors and out-of-range positions or angles.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Export SVG with the CSS text as the rectangle fill, like the web tool.
    #[arg(long, global = true)]
    pub verbatim_svg: bool,

    /// Preview width in terminal columns (0 disables the preview).
    #[arg(long, global = true, value_name = "COLS", env = "OMBRE_PREVIEW_WIDTH")]
    pub preview_width: Option<u32>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Task {
    /// Print the CSS declaration.
    Css {
        #[command(flatten)]
        gradient: GradientArgs,

        /// Also copy the declaration to the system clipboard.
        #[arg(long)]
        copy: bool,
    },
    /// Write an SVG document.
    Svg {
        #[command(flatten)]
        gradient: GradientArgs,

        #[arg(short, long, default_value = DEFAULT_SVG_NAME)]
        output: PathBuf,

        #[command(flatten)]
        size: SizeArgs,
    },
    /// Write a raster image; the format follows the file extension.
    Raster {
        #[command(flatten)]
        gradient: GradientArgs,

        #[arg(short, long, default_value = DEFAULT_RASTER_NAME)]
        output: PathBuf,

        #[command(flatten)]
        size: SizeArgs,
    },
    /// Edit a gradient interactively (default).
    Studio {
        #[command(flatten)]
        gradient: GradientArgs,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct SizeArgs {
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    #[arg(long, default_value_t = 600)]
    pub height: u32,
}

/// Initial gradient shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GradientArgs {
    /// linear, radial or conic.
    #[arg(long)]
    pub kind: Option<GradientKind>,

    /// Direction in degrees (linear and conic).
    #[arg(long, allow_negative_numbers = true)]
    pub angle: Option<i32>,

    /// Color stop as COLOR@POSITION, e.g. `#ff6b6b@0` or `rgb(0,0,0)@50`.
    #[arg(long = "stop", value_name = "COLOR@POS", value_parser = parse_stop)]
    pub stops: Vec<ColorStop>,

    /// Start from random stops and angle.
    #[arg(long, conflicts_with = "stops")]
    pub random: bool,

    /// Seed for `--random`, `add` and `random`.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GradientArgs {
    /// Builds the starting model and the session RNG.
    ///
    /// Under [`EditPolicy::Strict`] the whole model is validated.
    pub fn build(&self, policy: EditPolicy) -> Result<(GradientModel, StdRng), ValidationError> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let kind = self.kind.unwrap_or_default();
        let mut model = if self.stops.is_empty() {
            let mut model = GradientModel::new();
            model.set_kind(kind);
            model
        } else {
            GradientModel::from_parts(kind, DEFAULT_ANGLE, self.stops.clone())?
        }
        .with_policy(policy);

        if self.random {
            model.randomize_with(&mut rng);
        }
        if let Some(angle) = self.angle {
            model.set_angle(angle)?;
        }
        if policy == EditPolicy::Strict {
            model.validate()?;
        }
        Ok((model, rng))
    }
}

/// `COLOR@POS`; splits on the last `@`.
fn parse_stop(raw: &str) -> Result<ColorStop, String> {
    let (color, pos) = raw
        .rsplit_once('@')
        .ok_or_else(|| format!("expected COLOR@POS, got `{raw}`"))?;
    let color = color.trim();
    if color.is_empty() {
        return Err(format!("missing color in `{raw}`"));
    }
    let position = pos
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .map_err(|_| format!("invalid position in `{raw}`"))?;
    Ok(ColorStop::new(color, position))
}
