//! Checkpoint tag composition and validation.
//!
//! A tag is `<label>#<seq>` where the sequence number is strictly
//! increasing per tracker, starting at 1. Appending the number verbatim is
//! what guarantees uniqueness across a tracker's lifetime.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DebenchError, Result};

// Composed form: label restricted to [a-zA-Z0-9_ -], then '#' + digits.
static TAG_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_ -]+#[0-9]+$").ok());

/// Allocates strictly increasing sequence numbers and composes tags.
#[derive(Debug)]
pub struct TagRegistry {
    next: u64,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Next sequence number, starting at 1. Never reset within a tracker.
    pub fn next_seq(&mut self) -> u64 {
        let n = self.next;
        self.next += 1;
        n
    }

    /// Number of tags handed out so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }

    /// Compose a unique tag for `label`. An empty label becomes
    /// `point <seq>`; the sequence number is appended either way.
    pub fn make_tag(&mut self, label: &str) -> String {
        let seq = self.next_seq();
        if label.is_empty() {
            format!("point {seq}#{seq}")
        } else {
            format!("{label}#{seq}")
        }
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject empty or malformed composed tags. Defensive guard on the
/// low-level insertion path; `make_tag` output always passes.
pub fn validate_tag(tag: &str) -> Result<()> {
    let ok = match TAG_RE.as_ref() {
        Some(re) => re.is_match(tag),
        None => false,
    };
    if ok {
        Ok(())
    } else {
        Err(DebenchError::InvalidTag(tag.to_string()))
    }
}

/// Display form of a tag: the label with the `#<seq>` suffix stripped and
/// a leading `#` added, e.g. `render#3` shows as `#render`.
pub fn display_name(tag: &str) -> String {
    match tag.rfind('#') {
        Some(idx) => format!("#{}", &tag[..idx]),
        None => format!("#{tag}"),
    }
}
