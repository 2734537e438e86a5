//! Read-only environment facts for the report header.

use std::io::IsTerminal;

/// Runtime identification string shown in the report header.
pub fn runtime_version() -> String {
    format!(
        "{}-{} / debench {}",
        std::env::consts::OS,
        std::env::consts::ARCH,
        env!("CARGO_PKG_VERSION")
    )
}

/// Whether the process is attached to an interactive terminal.
pub fn is_cli_mode() -> bool {
    std::io::stdout().is_terminal()
}

/// Display string for the template-cache switch.
pub fn cache_status(enabled: bool) -> &'static str {
    if enabled {
        "On"
    } else {
        "Off"
    }
}

/// Per-request facts supplied by the host (HTTP layer or CLI driver).
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: String,
    pub status: u16,
}

impl Default for RequestInfo {
    fn default() -> Self {
        Self {
            method: "CLI".into(),
            status: 0,
        }
    }
}
