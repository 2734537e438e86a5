//! The checkpoint engine: ordered capture, tag assignment, and the
//! one-time duration pass.
//!
//! A tracker serves exactly one request. It moves through three states:
//! fresh (no checkpoints), active (accepting `mark` calls), finalized
//! (durations assigned, further mutation refused). Construction records
//! two synthetic points through the normal insertion path: one for the
//! request start and one for the tracker's own init.

use crate::collect::ErrorCollector;
use crate::error::{DebenchError, Result};
use crate::point::{Checkpoint, CheckpointStore, INTERNAL_SOURCE};
use crate::probe;
use crate::tag::TagRegistry;

/// Label of the synthetic request-start checkpoint. Its capture time is
/// the request start, before the tracker existed, so its memory reads 0.
pub const SCRIPT_LABEL: &str = "Script";

/// Label of the tracker's own init checkpoint.
pub const INIT_LABEL: &str = "Debench";

#[derive(Debug)]
pub struct Tracker {
    store: CheckpointStore,
    tags: TagRegistry,
    errors: ErrorCollector,
    request_start_ms: u64,
    init_ms: u64,
    end_ms: Option<u64>,
    enabled: bool,
}

impl Tracker {
    /// Build a tracker for a request that began at `request_start_ms`.
    /// A disabled tracker records nothing, ever.
    pub fn new(request_start_ms: u64, enabled: bool) -> Result<Self> {
        let mut tracker = Self {
            store: CheckpointStore::new(),
            tags: TagRegistry::new(),
            errors: ErrorCollector::new(),
            request_start_ms,
            init_ms: request_start_ms,
            end_ms: None,
            enabled,
        };

        if !tracker.enabled {
            return Ok(tracker);
        }

        tracker.insert_point(
            SCRIPT_LABEL,
            Checkpoint::new(request_start_ms, 0, INTERNAL_SOURCE, 0),
        )?;

        let now = probe::now_ms();
        tracker.init_ms = now;
        tracker.insert_point(
            INIT_LABEL,
            Checkpoint::new(now, probe::rss_bytes(), INTERNAL_SOURCE, 0),
        )?;

        Ok(tracker)
    }

    /// Record a checkpoint. Captures current time, current RSS, and the
    /// caller's source location. No-op when disabled or finalized.
    #[track_caller]
    pub fn mark(&mut self, label: &str) -> Result<()> {
        if !self.enabled || self.end_ms.is_some() {
            return Ok(());
        }
        let loc = std::panic::Location::caller();
        let point = Checkpoint::new(
            probe::now_ms(),
            probe::rss_bytes(),
            loc.file(),
            loc.line(),
        );
        self.insert_point(label, point)
    }

    // Normal insertion path: compose tag, validate, append. An invalid
    // composed tag is an engine defect and propagates as `InvalidTag`.
    fn insert_point(&mut self, label: &str, point: Checkpoint) -> Result<()> {
        let tag = self.tags.make_tag(label);
        self.store.insert(tag, point)
    }

    /// Run the one-time duration pass up to `end_ms`. Guarded: a second
    /// call returns [`DebenchError::AlreadyFinalized`] instead of
    /// corrupting the computed durations.
    pub fn finalize(&mut self, end_ms: u64) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if self.end_ms.is_some() {
            return Err(DebenchError::AlreadyFinalized);
        }
        self.end_ms = Some(end_ms);
        self.store.assign_durations(end_ms);
        tracing::debug!(checkpoints = self.store.len(), "durations assigned");
        Ok(())
    }

    /// Wall-clock time since the request started. Computed fresh from
    /// `now_ms`, independent of checkpoint bookkeeping, so it is correct
    /// before `finalize` runs.
    pub fn total_elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.request_start_ms)
    }

    /// Time spent before the tracker was constructed (framework preload).
    pub fn preload_ms(&self) -> u64 {
        self.init_ms.saturating_sub(self.request_start_ms)
    }

    pub fn request_start_ms(&self) -> u64 {
        self.request_start_ms
    }

    /// Ordered checkpoints, tag first.
    pub fn checkpoints(&self) -> impl Iterator<Item = (&str, &Checkpoint)> {
        self.store.iter()
    }

    pub fn checkpoint_count(&self) -> usize {
        self.store.len()
    }

    /// Append a captured panic/runtime error. Infallible; errors are
    /// report data, not tracker failures.
    pub fn capture_error(&mut self, message: impl Into<String>, file: impl Into<String>, line: u32) {
        self.errors.capture(message, file, line);
    }

    pub fn errors(&self) -> &ErrorCollector {
        &self.errors
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_finalized(&self) -> bool {
        self.end_ms.is_some()
    }
}
