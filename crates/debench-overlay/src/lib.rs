//! Debench overlay runtime.
//!
//! This crate wires the core checkpoint engine into a host process: YAML
//! config, the cached template renderer, theme-asset bootstrap, the report
//! assembler, the per-request session binding with its process-wide
//! convenience surface, and an axum middleware that appends the rendered
//! overlay to HTML responses. It is consumed by the demo binary
//! (`main.rs`) and by integration tests.

pub mod assets;
pub mod config;
pub mod http;
pub mod report;
pub mod session;
pub mod sysinfo;
pub mod template;
pub mod util;

pub use session::Session;
