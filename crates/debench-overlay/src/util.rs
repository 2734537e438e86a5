//! Small formatting helpers for the report.

const SUFFIXES: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable byte count with at most one decimal place
/// (`1536` -> `"1.5 KB"`, whole values drop the decimal).
pub fn format_bytes(size: u64) -> String {
    if size == 0 {
        return "0 B".into();
    }

    let mut value = size as f64;
    let mut idx = 0;
    while value >= 1024.0 && idx < SUFFIXES.len() - 1 {
        value /= 1024.0;
        idx += 1;
    }

    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, SUFFIXES[idx])
    } else {
        format!("{:.1} {}", rounded, SUFFIXES[idx])
    }
}

/// Share of `total_ms` spent in one segment, rounded to whole percent.
/// The denominator is floored to 1 so a request that rounds to 0 ms
/// cannot divide by zero.
pub fn percent_of(duration_ms: u64, total_ms: u64) -> u64 {
    let denom = total_ms.max(1) as f64;
    ((duration_ms as f64 / denom) * 100.0).round() as u64
}
