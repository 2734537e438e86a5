//! Top-level facade crate for Debench.
//!
//! Re-exports the core engine and the overlay runtime so hosts can depend
//! on a single crate, plus the static convenience surface at the root.

pub mod core {
    pub use debench_core::*;
}

pub mod overlay {
    pub use debench_overlay::*;
}

pub use debench_core::message::MessageLevel;
pub use debench_overlay::config::OverlayConfig;
pub use debench_overlay::session::{
    dump, error, flush_shared, info, init_shared, mark, record, set_enabled, set_minimal_report,
    shared, warning, Session,
};
