//! Debench core: the checkpoint engine, tag registry, message log, and
//! captured-error collector behind the request diagnostics overlay.
//!
//! This crate holds the ordered-checkpoint bookkeeping and the shared error
//! surface. It intentionally carries no runtime, template, or transport
//! dependencies so it can be embedded anywhere a request is being timed.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `DebenchError`/`Result` so the overlay
//! never takes down the request it is observing.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod collect;
pub mod engine;
pub mod error;
pub mod message;
pub mod point;
pub mod probe;
pub mod tag;

/// Shared result type.
pub use error::{DebenchError, Result};
pub use engine::Tracker;
