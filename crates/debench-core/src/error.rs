//! Shared error type across Debench crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, DebenchError>;

/// Unified error type used by the core engine and the overlay runtime.
#[derive(Debug, Error)]
pub enum DebenchError {
    /// A composed checkpoint tag was empty or malformed. This signals a
    /// defect in the engine itself, not bad user input, so it is surfaced
    /// loudly instead of silently dropping the checkpoint.
    #[error("invalid checkpoint tag: `{0}`")]
    InvalidTag(String),
    /// A render call referenced a template that could not be resolved.
    #[error("template not found: `{0}`")]
    TemplateNotFound(String),
    /// The theme directory could not be created or populated at setup.
    #[error("asset bootstrap failed: {0}")]
    AssetBootstrap(String),
    /// `finalize()` was called on an already-finalized tracker.
    #[error("checkpoints already finalized")]
    AlreadyFinalized,
    /// Bad or unparseable overlay configuration.
    #[error("invalid config: {0}")]
    Config(String),
    /// I/O failure on the template or asset paths.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
