//! tally core: the shared aggregate store, console line protocol, and error types.
//!
//! This crate holds the state contract between the ingestion/flush pipeline and
//! the admin console, plus the transport-agnostic pieces of the console wire
//! format. It carries no runtime or network dependencies so the aggregator can
//! embed the store without pulling in tokio.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `TallyError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod aggregate;
pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{Result, TallyError};
pub use aggregate::{AggregateStore, Aggregates, Snapshot, Stats, TimerSamples};
