//! Theme bootstrap: mirror the built-in asset tree into the host's theme
//! directory.
//!
//! The sync is cheap, not a real diff: a file is skipped when its on-disk
//! size already matches the embedded copy. A missing or unwritable
//! destination is fatal at setup, since a broken theme means a broken
//! report renderer.

use std::fs;
use std::path::Path;

use debench_core::error::{DebenchError, Result};

/// Built-in theme files, embedded at compile time.
const THEME_FILES: &[(&str, &str)] = &[
    ("debench/widget.htm", include_str!("../theme/debench/widget.htm")),
    (
        "debench/widget.minimal.htm",
        include_str!("../theme/debench/widget.minimal.htm"),
    ),
    (
        "debench/widget.log.htm",
        include_str!("../theme/debench/widget.log.htm"),
    ),
    (
        "debench/widget.message.htm",
        include_str!("../theme/debench/widget.message.htm"),
    ),
    (
        "debench/widget.exception.htm",
        include_str!("../theme/debench/widget.exception.htm"),
    ),
    (
        "debench/assets/debench.css",
        include_str!("../theme/debench/assets/debench.css"),
    ),
    (
        "debench/assets/debench.js",
        include_str!("../theme/debench/assets/debench.js"),
    ),
];

/// Mirror the built-in theme into `dest_dir`, file by file.
pub fn ensure_assets_present(dest_dir: &Path) -> Result<()> {
    if !dest_dir.exists() {
        let parent = match dest_dir.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !parent.exists() {
            return Err(DebenchError::AssetBootstrap(format!(
                "destination parent does not exist: {}",
                parent.display()
            )));
        }
        fs::create_dir_all(dest_dir).map_err(|e| {
            DebenchError::AssetBootstrap(format!(
                "cannot create {}: {e}",
                dest_dir.display()
            ))
        })?;
    }

    for (rel, body) in THEME_FILES {
        let target = dest_dir.join(rel);

        // Size match counts as up to date.
        if let Ok(meta) = fs::metadata(&target) {
            if meta.len() == body.len() as u64 {
                continue;
            }
        }

        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                DebenchError::AssetBootstrap(format!("cannot create {}: {e}", dir.display()))
            })?;
        }
        fs::write(&target, body).map_err(|e| {
            DebenchError::AssetBootstrap(format!("cannot write {}: {e}", target.display()))
        })?;
        tracing::debug!(file = %target.display(), "theme asset synced");
    }

    Ok(())
}
