//! Top-level facade crate for tally.
//!
//! Re-exports the core store/protocol types and the console library so users
//! can depend on a single crate.

pub mod core {
    pub use tally_core::*;
}

pub mod console {
    pub use tally_console::*;
}
