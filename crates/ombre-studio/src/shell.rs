//! Interactive studio session.
//!
//! [`Studio`] owns the one [`GradientModel`] of the session and applies
//! [`Command`]s to it one at a time. Rendering is derived from the model on
//! every frame; nothing is cached.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use console::Term;
use ombre_core::{EditPolicy, GradientKind, GradientModel, MIN_STOPS, StopEdit, ValidationError};
use ombre_export::{
    ClipboardSink, DEFAULT_RASTER_NAME, DEFAULT_SVG_NAME, ExportError, SvgMode, SvgOptions, copy_css, render_svg,
    save_raster, save_svg,
};
use rand::Rng;

use crate::command::{Command, HELP, ThemeChoice, parse_command};
use crate::config::StudioConfig;
use crate::preview::render_preview;
use crate::theme::{Palette, Theme};
use crate::view::{Notice, Status, render};

/// How long "Copied!" stays on screen.
pub const COPIED_FLASH: Duration = Duration::from_secs(2);

const PROMPT: &str = "> ";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Control {
    Continue,
    Exit,
}

pub struct Studio<C: ClipboardSink, R: Rng> {
    model: GradientModel,
    config: StudioConfig,
    clipboard: C,
    rng: R,
    copied_at: Option<Instant>,
    notice: Option<Notice>,
}

impl<C: ClipboardSink, R: Rng> Studio<C, R> {
    pub fn new(model: GradientModel, config: StudioConfig, clipboard: C, rng: R) -> Self {
        let model = model.with_policy(config.policy);
        Self { model, config, clipboard, rng, copied_at: None, notice: None }
    }

    pub fn model(&self) -> &GradientModel {
        &self.model
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn status(&self) -> Status {
        Status {
            copied: self.copied_at.is_some_and(|t| t.elapsed() < COPIED_FLASH),
            notice: self.notice.clone(),
        }
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Applies one command. Failures become a notice on the next frame.
    pub fn execute(&mut self, command: Command) -> Control {
        log::debug!("execute {command:?}");
        self.notice = None;

        match command {
            Command::Add => self.model.add_stop_with(&mut self.rng),
            Command::Remove(index) => self.remove(index),
            Command::SetColor(index, color) => self.edit(index, StopEdit::Color(color)),
            Command::SetPosition(index, position) => self.edit(index, StopEdit::Position(position)),
            Command::Kind(name) => self.set_kind(&name),
            Command::Angle(angle) => {
                if let Err(e) = self.model.set_angle(angle) {
                    self.reject(e);
                }
            }
            Command::Randomize => self.model.randomize_with(&mut self.rng),
            Command::Copy => self.copy(),
            Command::ExportSvg(path) => {
                let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_SVG_NAME));
                let result = save_svg(&path, &render_svg(&self.model, &self.config.svg));
                self.exported(&path, result);
            }
            Command::ExportRaster(path) => {
                let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_RASTER_NAME));
                let options = SvgOptions { mode: SvgMode::Native, ..self.config.svg };
                let svg = render_svg(&self.model, &options);
                let result = save_raster(&path, &svg, options.width, options.height);
                self.exported(&path, result);
            }
            Command::Theme(choice) => {
                self.config.theme = match choice {
                    ThemeChoice::Toggle => self.config.theme.toggled(),
                    ThemeChoice::Light => Theme::Light,
                    ThemeChoice::Dark => Theme::Dark,
                };
            }
            Command::Show => {}
            Command::Help => self.notice = Some(Notice::Info(HELP.to_string())),
            Command::Quit => return Control::Exit,
        }
        Control::Continue
    }

    fn remove(&mut self, index: usize) {
        let len = self.model.stops().len();
        if index >= len {
            self.notice = Some(Notice::Info(format!("there is no Color {}", index + 1)));
        } else if len <= MIN_STOPS {
            self.notice = Some(Notice::Info(format!("a gradient keeps at least {MIN_STOPS} color stops")));
        } else {
            self.model.remove_stop(index);
        }
    }

    fn edit(&mut self, index: usize, edit: StopEdit) {
        match self.model.update_stop(index, edit) {
            Ok(true) => {}
            Ok(false) => self.notice = Some(Notice::Info(format!("there is no Color {}", index + 1))),
            Err(e) => self.reject(e),
        }
    }

    fn set_kind(&mut self, name: &str) {
        if let Some(kind) = GradientKind::from_name(name) {
            self.model.set_kind(kind);
        } else if self.model.policy() == EditPolicy::Strict {
            self.reject(ValidationError::UnknownKind(name.to_string()));
        } else {
            self.model.set_kind(GradientKind::from_name_or_default(name));
            self.notice = Some(Notice::Info(format!("unknown gradient kind `{name}`, using linear")));
        }
    }

    fn copy(&mut self) {
        match copy_css(&mut self.clipboard, &self.model) {
            Ok(_) => self.copied_at = Some(Instant::now()),
            Err(e) => {
                log::warn!("clipboard copy failed: {e}");
                self.notice = Some(Notice::Error(format!("could not copy: {e}")));
            }
        }
    }

    fn exported(&mut self, path: &Path, result: Result<(), ExportError>) {
        self.notice = Some(match result {
            Ok(()) => Notice::Info(format!("saved {}", path.display())),
            Err(e) => {
                log::warn!("export to {} failed: {e}", path.display());
                Notice::Error(format!("could not save {}: {e}", path.display()))
            }
        });
    }

    fn reject(&mut self, error: ValidationError) {
        log::debug!("rejected edit: {error}");
        self.notice = Some(Notice::Error(error.to_string()));
    }

    // ── Frame ─────────────────────────────────────────────────────────────

    /// Full screen text for the current state.
    pub fn frame(&self) -> String {
        let palette = if self.config.ansi { self.config.theme.palette() } else { Palette::plain() };
        let mut out = render(&self.model, &palette, &self.status());

        if self.config.preview_enabled() {
            match render_preview(&self.model, self.config.preview_cols, self.config.preview_rows, palette.surface) {
                Ok(swatch) => {
                    out.push('\n');
                    out.push_str(&swatch);
                }
                Err(e) => log::warn!("preview failed: {e}"),
            }
        }
        out
    }

    // ── Loop ──────────────────────────────────────────────────────────────

    /// Reads commands from `input` until `quit` or end of input.
    ///
    /// With ANSI output enabled the terminal on stdout is cleared before
    /// each frame, so `output` is expected to be stdout in that case.
    pub fn run(&mut self, mut input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
        let mut line = String::new();
        let term = Term::stdout();
        loop {
            if self.config.ansi {
                if let Err(e) = term.clear_screen() {
                    log::debug!("clear screen failed: {e}");
                }
            }
            write!(output, "{}\n{PROMPT}", self.frame()).context("writing frame")?;
            output.flush().context("flushing output")?;

            line.clear();
            if input.read_line(&mut line).context("reading command")? == 0 {
                log::debug!("end of input");
                break;
            }

            match parse_command(&line) {
                Ok(Some(command)) => {
                    if self.execute(command) == Control::Exit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => self.notice = Some(Notice::Error(e.to_string())),
            }
        }
        writeln!(output).context("writing output")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ombre_export::MemoryClipboard;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    struct Broken;

    impl ClipboardSink for Broken {
        fn set_text(&mut self, _: &str) -> Result<(), ExportError> {
            Err(ExportError::Io(std::io::Error::other("no clipboard on this display")))
        }
    }

    fn plain_config() -> StudioConfig {
        StudioConfig { ansi: false, ..StudioConfig::default() }
    }

    fn studio() -> Studio<MemoryClipboard, StdRng> {
        Studio::new(GradientModel::new(), plain_config(), MemoryClipboard::new(), StdRng::seed_from_u64(1))
    }

    fn strict() -> Studio<MemoryClipboard, StdRng> {
        let config = StudioConfig { policy: EditPolicy::Strict, ..plain_config() };
        Studio::new(GradientModel::new(), config, MemoryClipboard::new(), StdRng::seed_from_u64(1))
    }

    fn run(studio: &mut Studio<MemoryClipboard, StdRng>, script: &str) -> String {
        let mut out = Vec::new();
        studio.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    // ── editing ───────────────────────────────────────────────────────────

    #[test]
    fn add_then_remove() {
        let mut s = studio();
        s.execute(Command::Add);
        assert_eq!(s.model().stops().len(), 3);
        s.execute(Command::Remove(0));
        assert_eq!(s.model().stops()[0].color, "#764ba2");
        assert!(s.notice().is_none());
    }

    #[test]
    fn refused_removal_leaves_a_notice() {
        let mut s = studio();
        s.execute(Command::Remove(0));
        assert_eq!(s.model().stops().len(), 2);
        assert_eq!(s.notice(), Some(&Notice::Info("a gradient keeps at least 2 color stops".into())));

        s.execute(Command::Remove(9));
        assert_eq!(s.notice(), Some(&Notice::Info("there is no Color 10".into())));
    }

    #[test]
    fn edits_recompile() {
        let mut s = studio();
        s.execute(Command::SetColor(0, "tomato".into()));
        s.execute(Command::SetPosition(1, 75.0));
        s.execute(Command::Kind("conic".into()));
        s.execute(Command::Angle(45));
        assert_eq!(s.model().css(), "conic-gradient(from 45deg, tomato 0%, #764ba2 75%)");
    }

    #[test]
    fn permissive_unknown_kind_falls_back() {
        let mut s = studio();
        s.execute(Command::Kind("radial".into()));
        s.execute(Command::Kind("diamond".into()));
        assert_eq!(s.model().kind(), GradientKind::Linear);
        assert!(matches!(s.notice(), Some(Notice::Info(m)) if m.contains("diamond")));
    }

    #[test]
    fn strict_rejections_keep_the_model() {
        let mut s = strict();
        let before = s.model().clone();
        s.execute(Command::SetColor(0, "#12".into()));
        assert!(matches!(s.notice(), Some(Notice::Error(_))));
        s.execute(Command::SetPosition(0, 120.0));
        s.execute(Command::Angle(400));
        s.execute(Command::Kind("diamond".into()));
        assert_eq!(s.notice(), Some(&Notice::Error(ValidationError::UnknownKind("diamond".into()).to_string())));
        assert_eq!(s.model(), &before);
    }

    #[test]
    fn randomize_is_seeded() {
        let mut a = studio();
        let mut b = studio();
        a.execute(Command::Randomize);
        b.execute(Command::Randomize);
        assert_eq!(a.model(), b.model());
        assert!((2..=4).contains(&a.model().stops().len()));
    }

    // ── copy / export ─────────────────────────────────────────────────────

    #[test]
    fn copy_writes_declaration_and_flashes() {
        let mut s = studio();
        assert!(!s.status().copied);
        s.execute(Command::Copy);
        assert_eq!(s.clipboard().contents(), Some("background: linear-gradient(90deg, #667eea 0%, #764ba2 100%);"));
        assert!(s.status().copied);
        assert!(s.frame().contains("Copied!"));
    }

    #[test]
    fn clipboard_failure_is_a_notice() {
        let mut s = Studio::new(GradientModel::new(), plain_config(), Broken, StdRng::seed_from_u64(0));
        assert_eq!(s.execute(Command::Copy), Control::Continue);
        assert!(!s.status().copied);
        assert!(matches!(s.notice(), Some(Notice::Error(m)) if m.starts_with("could not copy")));
    }

    #[test]
    fn exports_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("g.svg");
        let png = dir.path().join("g.png");
        let mut s = studio();
        s.execute(Command::ExportSvg(Some(svg.clone())));
        s.execute(Command::ExportRaster(Some(png.clone())));
        assert!(std::fs::read_to_string(&svg).unwrap().contains("<linearGradient"));
        assert!(std::fs::metadata(&png).unwrap().len() > 0);
        assert!(matches!(s.notice(), Some(Notice::Info(m)) if m.starts_with("saved")));
    }

    #[test]
    fn verbatim_svg_mode_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v.svg");
        let mut config = plain_config();
        config.svg.mode = SvgMode::Verbatim;
        let mut s = Studio::new(GradientModel::new(), config, MemoryClipboard::new(), StdRng::seed_from_u64(0));
        s.execute(Command::ExportSvg(Some(path.clone())));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600"><rect width="800" height="600" fill="linear-gradient(90deg, #667eea 0%, #764ba2 100%)"/></svg>"#
        );
    }

    #[test]
    fn failed_export_is_a_notice() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = studio();
        s.execute(Command::ExportRaster(Some(dir.path().join("g.unknown"))));
        assert!(matches!(s.notice(), Some(Notice::Error(_))));
    }

    #[test]
    fn theme_commands() {
        let mut s = studio();
        s.execute(Command::Theme(ThemeChoice::Toggle));
        assert_eq!(s.config().theme, Theme::Dark);
        s.execute(Command::Theme(ThemeChoice::Light));
        assert_eq!(s.config().theme, Theme::Light);
    }

    #[test]
    fn styled_frame_uses_theme_palette() {
        let config = StudioConfig { ansi: true, preview_cols: 0, ..StudioConfig::default() };
        let s = Studio::new(GradientModel::new(), config, MemoryClipboard::new(), StdRng::seed_from_u64(0));
        let frame = s.frame();
        assert!(frame.contains("\x1b["));
        assert!(frame.contains("CSS Gradient Generator"));
        assert!(!frame.contains('\u{2580}'));
    }

    // ── loop ──────────────────────────────────────────────────────────────

    #[test]
    fn run_applies_script_and_quits() {
        let mut s = studio();
        let out = run(&mut s, "kind radial\ncolor 1 rgb(255, 0, 0)\nquit\nadd\n");
        assert_eq!(s.model().css(), "radial-gradient(circle, rgb(255, 0, 0) 0%, #764ba2 100%)");
        assert_eq!(s.model().stops().len(), 2);
        assert!(out.contains("background: radial-gradient"));
        assert!(!out.contains("\x1b["));
    }

    #[test]
    fn run_stops_at_end_of_input() {
        let mut s = studio();
        run(&mut s, "add\n");
        assert_eq!(s.model().stops().len(), 3);
    }

    #[test]
    fn parse_errors_are_shown() {
        let mut s = studio();
        let out = run(&mut s, "paint it\n");
        assert!(out.contains("col 1: unknown command `paint`"));
    }
}
