//! Top-level facade crate for promtext.
//!
//! Re-exports the core (identity, store, exposition) and the metric kinds so
//! users can depend on a single crate.

pub mod core {
    pub use promtext_core::*;
}

pub mod kinds {
    pub use promtext_kinds::*;
}
