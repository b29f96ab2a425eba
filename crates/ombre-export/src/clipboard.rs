//! Clipboard export.
//!
//! The copied text is always the full declaration, `background: <css>;`.

use ombre_core::{GradientModel, declaration};

use crate::error::ExportError;

/// Destination for copied CSS.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ExportError>;
}

/// System clipboard backed by `arboard`.
///
/// The handle is opened on first use and kept for the session; on X11 the
/// copied text is only served while the handle is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ExportError> {
        let mut cb = match self.inner.take() {
            Some(cb) => cb,
            None => arboard::Clipboard::new()?,
        };
        let result = cb.set_text(text.to_owned());
        self.inner = Some(cb);
        result.map_err(ExportError::from)
    }
}

/// In-process clipboard; remembers the last text written.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ExportError> {
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

/// Copies `background: <css>;` for `model` and returns the copied text.
pub fn copy_css<S: ClipboardSink + ?Sized>(sink: &mut S, model: &GradientModel) -> Result<String, ExportError> {
    let text = declaration(&model.css());
    sink.set_text(&text)?;
    log::debug!("copied {} bytes to clipboard", text.len());
    Ok(text)
}
