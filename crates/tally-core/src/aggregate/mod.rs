//! Shared aggregate state (counters, timers, gauges, and pipeline stats).
//!
//! The store is owned by the aggregator process and handed to every consumer
//! as a cheap clone of one `Arc`. A single coarse lock guards all three maps
//! and the stats record together, so any reader holding the guard sees a
//! consistent view. Critical sections must stay short and never span I/O.

mod dump;
mod stats;
mod store;

pub use dump::dump_map;
pub use stats::Stats;
pub use store::{AggregateStore, Aggregates, Snapshot, TimerSamples};
