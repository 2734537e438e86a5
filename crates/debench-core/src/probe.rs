//! Wall-clock and process-memory probes.
//!
//! Memory readings come from `/proc/self/status` (`VmRSS` for current,
//! `VmHWM` for peak). On platforms without procfs both readings fall back
//! to 0, so the overlay still renders, just without memory figures.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in whole milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Current resident set size in bytes.
pub fn rss_bytes() -> u64 {
    read_status_field("VmRSS:")
}

/// Peak resident set size in bytes.
pub fn rss_peak_bytes() -> u64 {
    read_status_field("VmHWM:")
}

// Lines look like "VmRSS:    123456 kB".
fn read_status_field(field: &str) -> u64 {
    let Ok(status) = std::fs::read_to_string("/proc/self/status") else {
        return 0;
    };
    for line in status.lines() {
        if let Some(rest) = line.strip_prefix(field) {
            if let Some(kb) = rest
                .split_whitespace()
                .next()
                .and_then(|v| v.parse::<u64>().ok())
            {
                return kb * 1024;
            }
        }
    }
    0
}
