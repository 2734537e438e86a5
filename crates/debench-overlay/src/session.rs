//! Per-request session binding and the process-wide convenience surface.
//!
//! A [`Session`] is an explicit context object: constructed once at the
//! request's entry point and handed to whoever needs it. The process-wide
//! accessor (`init_shared` / `shared` and the free functions below) is a
//! thin layer over exactly one such session for hosts that want the
//! static-call style; it never re-runs initialization side effects.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use serde::Serialize;

use debench_core::engine::Tracker;
use debench_core::message::{MessageLevel, MessageLog};
use debench_core::probe;
use debench_core::Result;

use crate::assets;
use crate::config::{OverlayConfig, OverlaySection};
use crate::report::ReportAssembler;
use crate::sysinfo::RequestInfo;
use crate::template::TemplateEngine;

// The process-wide log backs the static convenience API, which may record
// before any session exists. Only the shared session drains it at flush;
// per-request sessions carry their own log so concurrent requests cannot
// see each other's messages.
static MESSAGES: Mutex<MessageLog> = Mutex::new(MessageLog::new());

static SHARED: OnceLock<Mutex<Session>> = OnceLock::new();

pub struct Session {
    tracker: Tracker,
    templates: TemplateEngine,
    theme_dir: PathBuf,
    minimal: bool,
    request: RequestInfo,
    messages: MessageLog,
    drain_global_messages: bool,
    report_to_stdout: bool,
    flushed: bool,
}

impl Session {
    /// Build a session for a request that starts now.
    pub fn new(section: OverlaySection) -> Result<Self> {
        Self::with_start(section, probe::now_ms())
    }

    /// Build a session for a request that began at `request_start_ms`
    /// (the host usually knows this before the overlay is constructed).
    pub fn with_start(section: OverlaySection, request_start_ms: u64) -> Result<Self> {
        let theme_dir = PathBuf::from(&section.theme_dir);
        if section.enabled {
            assets::ensure_assets_present(&theme_dir)?;
        }
        Ok(Self {
            tracker: Tracker::new(request_start_ms, section.enabled)?,
            templates: TemplateEngine::new(section.template_cache),
            theme_dir,
            minimal: section.minimal,
            request: RequestInfo::default(),
            messages: MessageLog::new(),
            drain_global_messages: false,
            report_to_stdout: true,
            flushed: false,
        })
    }

    /// Record a checkpoint at the caller's location.
    #[track_caller]
    pub fn mark(&mut self, label: &str) -> Result<()> {
        self.tracker.mark(label)
    }

    /// Record a message into this session's report.
    #[track_caller]
    pub fn record(&mut self, text: impl Into<String>, level: MessageLevel) {
        self.messages.record(text, level);
    }

    /// Serialize `value` as pretty JSON into a `Dump` message.
    #[track_caller]
    pub fn dump<T: Serialize>(&mut self, value: &T) {
        self.record(dump_text(value), MessageLevel::Dump);
    }

    /// Append a captured panic/runtime error to this session's tracker.
    pub fn capture_error(
        &mut self,
        message: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) {
        self.tracker.capture_error(message, file, line);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.tracker.set_enabled(enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.tracker.is_enabled()
    }

    pub fn set_minimal(&mut self, minimal: bool) {
        self.minimal = minimal;
    }

    pub fn set_request_info(&mut self, request: RequestInfo) {
        self.request = request;
    }

    /// Suppress the end-of-request stdout write (the HTTP layer appends
    /// the fragment to the response instead).
    pub fn set_stdout_report(&mut self, on: bool) {
        self.report_to_stdout = on;
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Finalize and render. Returns `None` when disabled or already
    /// flushed; at most one report per session.
    pub fn flush(&mut self) -> Result<Option<String>> {
        if self.flushed || !self.tracker.is_enabled() {
            return Ok(None);
        }
        self.flushed = true;
        self.tracker.finalize(probe::now_ms())?;

        // Global entries (recorded via the static API, possibly before the
        // session existed) come first; they only flow into the shared
        // session, never into per-request ones.
        let mut messages = if self.drain_global_messages {
            take_messages()
        } else {
            MessageLog::new()
        };
        messages.merge(std::mem::take(&mut self.messages));

        let assembler = ReportAssembler::new(&self.templates, &self.theme_dir);
        let html = assembler.build(&self.tracker, &messages, &self.request, self.minimal)?;
        Ok(Some(html))
    }

    /// Finalize, render, and write the fragment to stdout.
    pub fn flush_to_stdout(&mut self) {
        match self.flush() {
            Ok(Some(html)) => {
                use std::io::Write;
                let _ = writeln!(std::io::stdout(), "{html}");
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "overlay flush failed"),
        }
    }
}

impl Drop for Session {
    // Best-effort end-of-request report when the host forgot to flush.
    // Skipped on unrecoverable crashes, as documented.
    fn drop(&mut self) {
        if !self.flushed && self.report_to_stdout && self.tracker.is_enabled() {
            self.flush_to_stdout();
        }
    }
}

fn take_messages() -> MessageLog {
    match MESSAGES.lock() {
        Ok(mut log) => std::mem::take(&mut *log),
        Err(_) => MessageLog::new(),
    }
}

/// Create the process-wide session. Subsequent calls return without
/// re-running initialization side effects (asset bootstrap, panic hook).
pub fn init_shared(cfg: OverlayConfig) -> Result<()> {
    // Serialize first calls: exactly one caller bootstraps assets and
    // installs the panic hook, everyone else observes the stored session.
    static INIT: Mutex<()> = Mutex::new(());
    let _guard = match INIT.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    if SHARED.get().is_some() {
        return Ok(());
    }
    let mut session = Session::new(cfg.overlay)?;
    session.drain_global_messages = true;
    install_panic_hook();
    let _ = SHARED.set(Mutex::new(session));
    Ok(())
}

/// The process-wide session, if `init_shared` has run.
pub fn shared() -> Option<&'static Mutex<Session>> {
    SHARED.get()
}

/// Finalize the shared session and write its report to stdout.
pub fn flush_shared() {
    if let Some(cell) = SHARED.get() {
        if let Ok(mut session) = cell.lock() {
            session.flush_to_stdout();
        }
    }
}

// Panic hook feeding the shared session's error collector. Captures are
// report data; the hook must never disturb the panic itself.
fn install_panic_hook() {
    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if let Some(cell) = SHARED.get() {
            if let Ok(mut session) = cell.lock() {
                let message = if let Some(s) = info.payload().downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = info.payload().downcast_ref::<String>() {
                    s.clone()
                } else {
                    "panic".to_string()
                };
                let (file, line) = info
                    .location()
                    .map(|l| (l.file().to_string(), l.line()))
                    .unwrap_or_default();
                session.capture_error(message, file, line);
            }
        }
        prev(info);
    }));
}

/// Record a checkpoint on the shared session. No-op before `init_shared`.
#[track_caller]
pub fn mark(label: &str) {
    if let Some(cell) = SHARED.get() {
        if let Ok(mut session) = cell.lock() {
            if let Err(e) = session.mark(label) {
                tracing::warn!(error = %e, "checkpoint rejected");
            }
        }
    }
}

/// Record a message into the process-wide log. Safe before `init_shared`.
#[track_caller]
pub fn record(text: impl Into<String>, level: MessageLevel) {
    if let Ok(mut log) = MESSAGES.lock() {
        log.record(text, level);
    }
}

#[track_caller]
pub fn info(text: impl Into<String>) {
    record(text, MessageLevel::Info);
}

#[track_caller]
pub fn warning(text: impl Into<String>) {
    record(text, MessageLevel::Warning);
}

#[track_caller]
pub fn error(text: impl Into<String>) {
    record(text, MessageLevel::Error);
}

/// Serialize `value` as pretty JSON into a `Dump`-level message.
#[track_caller]
pub fn dump<T: Serialize>(value: &T) {
    record(dump_text(value), MessageLevel::Dump);
}

fn dump_text<T: Serialize>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => format!("<unserializable: {e}>"),
    }
}

/// Toggle the shared session's minimal-report mode.
pub fn set_minimal_report(minimal: bool) {
    if let Some(cell) = SHARED.get() {
        if let Ok(mut session) = cell.lock() {
            session.set_minimal(minimal);
        }
    }
}

/// Toggle the shared session on or off.
pub fn set_enabled(enabled: bool) {
    if let Some(cell) = SHARED.get() {
        if let Ok(mut session) = cell.lock() {
            session.set_enabled(enabled);
        }
    }
}
