//! Captured panic and runtime-error records.
//!
//! These are *data* for the report, never failures of the tracker itself:
//! capturing must not fail even when the source information is partial.
//! The collector is a plain owned object; the host process decides which
//! hooks (panic hook, error handler) feed it.

/// An intercepted panic or promoted runtime error.
#[derive(Debug, Clone)]
pub struct CapturedError {
    pub message: String,
    /// Source file if known, empty otherwise.
    pub file: String,
    /// Source line if known, 0 otherwise.
    pub line: u32,
}

/// Append-only list of captured errors, read once by the report assembler.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    entries: Vec<CapturedError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a captured error. Infallible by design; missing location
    /// information defaults to `""`/`0`.
    pub fn capture(&mut self, message: impl Into<String>, file: impl Into<String>, line: u32) {
        self.entries.push(CapturedError {
            message: message.into(),
            file: file.into(),
            line,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CapturedError> {
        self.entries.iter()
    }
}
