//! Assembles the final overlay fragment from engine and collector state.
//!
//! One render call per checkpoint/message/error row plus one for the outer
//! shell; minimal mode is a single condensed line. The assembler only
//! reads state, so it can run at most once per request without owning any
//! of it.

use std::path::{Path, PathBuf};

use debench_core::collect::ErrorCollector;
use debench_core::engine::Tracker;
use debench_core::message::MessageLog;
use debench_core::probe;
use debench_core::tag;
use debench_core::Result;

use crate::sysinfo::{self, RequestInfo};
use crate::template::TemplateEngine;
use crate::util::{format_bytes, percent_of};

const SHELL: &str = "debench/widget.htm";
const SHELL_MINIMAL: &str = "debench/widget.minimal.htm";
const ROW_CHECKPOINT: &str = "debench/widget.log.htm";
const ROW_MESSAGE: &str = "debench/widget.message.htm";
const ROW_ERROR: &str = "debench/widget.exception.htm";

pub struct ReportAssembler<'a> {
    templates: &'a TemplateEngine,
    theme_dir: &'a Path,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(templates: &'a TemplateEngine, theme_dir: &'a Path) -> Self {
        Self {
            templates,
            theme_dir,
        }
    }

    fn template_path(&self, rel: &str) -> PathBuf {
        self.theme_dir.join(rel)
    }

    /// Build the overlay fragment. Expects a finalized tracker; total
    /// elapsed time is computed fresh so it stays correct either way.
    pub fn build(
        &self,
        tracker: &Tracker,
        messages: &MessageLog,
        request: &RequestInfo,
        minimal: bool,
    ) -> Result<String> {
        let total_ms = tracker.total_elapsed_ms(probe::now_ms());
        let ram_peak = format_bytes(probe::rss_peak_bytes());

        if minimal {
            return self.templates.render(
                &self.template_path(SHELL_MINIMAL),
                &[
                    ("total_ms", total_ms.to_string()),
                    ("ram_peak", ram_peak),
                    ("checkpoint_count", tracker.checkpoint_count().to_string()),
                ],
            );
        }

        let checkpoint_rows = self.checkpoint_rows(tracker, total_ms)?;
        let message_rows = self.message_rows(messages)?;
        let error_rows = self.error_rows(tracker.errors())?;

        self.templates.render(
            &self.template_path(SHELL),
            &[
                ("base", self.theme_dir.to_string_lossy().into_owned()),
                ("total_ms", total_ms.to_string()),
                ("ram_current", format_bytes(probe::rss_bytes())),
                ("ram_peak", ram_peak),
                ("checkpoint_count", tracker.checkpoint_count().to_string()),
                ("preload_ms", tracker.preload_ms().to_string()),
                ("method", request.method.clone()),
                ("status", request.status.to_string()),
                ("runtime", sysinfo::runtime_version()),
                ("cache", sysinfo::cache_status(self.templates.is_caching()).into()),
                (
                    "mode",
                    (if sysinfo::is_cli_mode() { "cli" } else { "server" }).into(),
                ),
                ("checkpoint_rows", checkpoint_rows),
                ("message_rows", message_rows),
                ("error_rows", error_rows),
            ],
        )
    }

    fn checkpoint_rows(&self, tracker: &Tracker, total_ms: u64) -> Result<String> {
        let path = self.template_path(ROW_CHECKPOINT);
        let mut rows = String::new();
        for (tag, point) in tracker.checkpoints() {
            let duration = point.duration_ms.unwrap_or(0);
            rows.push_str(&self.templates.render(
                &path,
                &[
                    ("name", tag::display_name(tag)),
                    ("duration_ms", duration.to_string()),
                    ("memory", format_bytes(point.memory_bytes)),
                    ("path", point.source_path.to_string()),
                    ("line", point.source_line.to_string()),
                    ("percent", percent_of(duration, total_ms).to_string()),
                ],
            )?);
        }
        Ok(rows)
    }

    fn message_rows(&self, messages: &MessageLog) -> Result<String> {
        let path = self.template_path(ROW_MESSAGE);
        let mut rows = String::new();
        for msg in messages.iter() {
            rows.push_str(&self.templates.render(
                &path,
                &[
                    ("level", msg.level.label().into()),
                    ("color", msg.level.color().into()),
                    ("text", msg.text.clone()),
                    ("path", msg.source_path.to_string()),
                    ("line", msg.source_line.to_string()),
                ],
            )?);
        }
        Ok(rows)
    }

    fn error_rows(&self, errors: &ErrorCollector) -> Result<String> {
        let path = self.template_path(ROW_ERROR);
        let mut rows = String::new();
        for err in errors.iter() {
            rows.push_str(&self.templates.render(
                &path,
                &[
                    ("message", err.message.clone()),
                    ("path", err.file.clone()),
                    ("line", err.line.to_string()),
                ],
            )?);
        }
        Ok(rows)
    }
}
