//! Checkpoint records and the insertion-ordered store.
//!
//! Capture time and segment duration are two separate fields. The capture
//! timestamp is written once and never overwritten; the duration is filled
//! in by a single finalize pass. Insertion order is chronological order and
//! the duration pass depends on it, so the store never reorders entries.

use crate::error::Result;
use crate::tag;

/// Sentinel source path for synthetic (tracker-generated) checkpoints.
pub const INTERNAL_SOURCE: &str = "";

/// One recorded instant in the request timeline.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    /// Absolute epoch-ms at capture.
    pub captured_at_ms: u64,
    /// Elapsed time to the next checkpoint (end-of-request for the last
    /// one). `None` until the finalize pass runs.
    pub duration_ms: Option<u64>,
    /// Resident set size at capture; 0 for the synthetic script-start point.
    pub memory_bytes: u64,
    /// Caller source file, or [`INTERNAL_SOURCE`] for synthetic points.
    pub source_path: &'static str,
    /// Caller line, or 0 for synthetic points.
    pub source_line: u32,
}

impl Checkpoint {
    pub fn new(captured_at_ms: u64, memory_bytes: u64, source_path: &'static str, source_line: u32) -> Self {
        Self {
            captured_at_ms,
            duration_ms: None,
            memory_bytes,
            source_path,
            source_line,
        }
    }
}

/// Insertion-ordered mapping tag -> checkpoint, owned by the tracker.
#[derive(Debug, Default)]
pub struct CheckpointStore {
    entries: Vec<(String, Checkpoint)>,
}

impl CheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a checkpoint under `tag`. The tag is validated here so a
    /// malformed key from internal misuse fails loudly instead of
    /// producing a misleading report.
    pub fn insert(&mut self, tag: String, point: Checkpoint) -> Result<()> {
        tag::validate_tag(&tag)?;
        self.entries.push((tag, point));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Checkpoint)> {
        self.entries.iter().map(|(t, p)| (t.as_str(), p))
    }

    /// Single in-order duration pass: each checkpoint's duration is the
    /// gap to the next one's capture time; the last runs to `end_ms`.
    /// Saturating in case probe imprecision made captures non-monotonic.
    pub fn assign_durations(&mut self, end_ms: u64) {
        for i in 0..self.entries.len() {
            let next_start = match self.entries.get(i + 1) {
                Some((_, next)) => next.captured_at_ms,
                None => end_ms,
            };
            let point = &mut self.entries[i].1;
            point.duration_ms = Some(next_start.saturating_sub(point.captured_at_ms));
        }
    }
}
