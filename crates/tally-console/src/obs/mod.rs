//! Console self-metrics.
//!
//! Counters and gauges are stored as atomics behind `DashMap` label sets and
//! rendered in Prometheus text format by the ops `/metrics` handler.

pub mod metrics;

pub use metrics::ConsoleMetrics;
