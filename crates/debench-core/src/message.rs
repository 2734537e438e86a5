//! Structured report messages and their severity levels.
//!
//! Messages are independent of any single tracker's lifetime: the overlay
//! keeps one process-wide log so the convenience API can record before a
//! tracker exists.

/// Severity of a report message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
    Dump,
}

impl MessageLevel {
    /// Uppercase label shown in the report row.
    pub fn label(self) -> &'static str {
        match self {
            MessageLevel::Info => "INFO",
            MessageLevel::Warning => "WARNING",
            MessageLevel::Error => "ERROR",
            MessageLevel::Dump => "DUMP",
        }
    }

    /// Accent color for the report theme.
    pub fn color(self) -> &'static str {
        match self {
            MessageLevel::Info => "#aabbcc",
            MessageLevel::Warning => "#fff000",
            MessageLevel::Error => "#ff0000",
            MessageLevel::Dump => "#aabbcc",
        }
    }
}

/// One log entry destined for the report.
#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub level: MessageLevel,
    pub source_path: &'static str,
    pub source_line: u32,
}

/// Append-only message list.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Vec<Message>,
}

impl MessageLog {
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Record a message, capturing the caller's source location.
    #[track_caller]
    pub fn record(&mut self, text: impl Into<String>, level: MessageLevel) {
        let loc = std::panic::Location::caller();
        self.entries.push(Message {
            text: text.into(),
            level,
            source_path: loc.file(),
            source_line: loc.line(),
        });
    }

    /// Move every entry of `other` onto the end of this log.
    pub fn merge(&mut self, other: MessageLog) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }
}
