use std::io;

use anyhow::Context;
use clap::Parser;
use ombre_core::{GradientModel, declaration};
use ombre_export::{ClipboardSink, SvgMode, SvgOptions, SystemClipboard, copy_css, render_svg, save_raster, save_svg};

use ombre_studio::cli::{Cli, GradientArgs, Task};
use ombre_studio::config::StudioConfig;
use ombre_studio::logging::init_logging;
use ombre_studio::shell::Studio;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = StudioConfig::from_args(&cli.global);
    init_logging(config.logging.clone());

    let task = cli.task.unwrap_or(Task::Studio { gradient: GradientArgs::default() });
    match task {
        Task::Css { gradient, copy } => {
            let (model, _) = gradient.build(config.policy).context("invalid gradient")?;
            if copy {
                let mut clipboard = SystemClipboard::new();
                copy_to(&mut clipboard, &model);
            }
            println!("{}", declaration(&model.css()));
        }
        Task::Svg { gradient, output, size } => {
            let (model, _) = gradient.build(config.policy).context("invalid gradient")?;
            let options = SvgOptions { width: size.width, height: size.height, mode: config.svg.mode };
            save_svg(&output, &render_svg(&model, &options))
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
        Task::Raster { gradient, output, size } => {
            let (model, _) = gradient.build(config.policy).context("invalid gradient")?;
            let options = SvgOptions { width: size.width, height: size.height, mode: SvgMode::Native };
            save_raster(&output, &render_svg(&model, &options), size.width, size.height)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
        Task::Studio { gradient } => {
            let (model, rng) = gradient.build(config.policy).context("invalid gradient")?;
            let mut studio = Studio::new(model, config, SystemClipboard::new(), rng);
            studio.run(io::stdin().lock(), io::stdout().lock())?;
        }
    }
    Ok(())
}

/// Clipboard failures are reported, never fatal.
fn copy_to(clipboard: &mut impl ClipboardSink, model: &GradientModel) {
    if let Err(e) = copy_css(clipboard, model) {
        log::warn!("clipboard copy failed: {e}");
    }
}
