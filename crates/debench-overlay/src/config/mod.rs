//! Overlay config loader (strict parsing).

pub mod schema;

use std::fs;

use debench_core::error::{DebenchError, Result};

pub use schema::{OverlayConfig, OverlaySection};

pub fn load_from_file(path: &str) -> Result<OverlayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| DebenchError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<OverlayConfig> {
    let cfg: OverlayConfig =
        serde_yaml::from_str(s).map_err(|e| DebenchError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
