use std::collections::HashMap;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::Serialize;

use super::stats::Stats;

/// Observed timer values between two flushes, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimerSamples(Vec<f64>);

impl TimerSamples {
    pub fn push(&mut self, value: f64) {
        self.0.push(value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for TimerSamples {
    fn from(v: Vec<f64>) -> Self {
        Self(v)
    }
}

/// Everything guarded by the store lock.
#[derive(Debug, Default)]
pub struct Aggregates {
    pub counters: HashMap<String, i64>,
    pub timers: HashMap<String, TimerSamples>,
    pub gauges: HashMap<String, f64>,
    pub stats: Stats,
}

/// Accumulated state handed to a flush.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub counters: HashMap<String, i64>,
    pub timers: HashMap<String, TimerSamples>,
    pub gauges: HashMap<String, f64>,
}

/// Shared handle to the aggregate state.
#[derive(Clone, Default)]
pub struct AggregateStore {
    inner: Arc<Mutex<Aggregates>>,
}

impl AggregateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the store lock.
    ///
    /// A poisoned lock is recovered: a panic elsewhere cannot leave a
    /// `HashMap` structurally invalid, so the data is still usable.
    pub fn lock(&self) -> MutexGuard<'_, Aggregates> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` inside the critical section.
    pub fn with<R>(&self, f: impl FnOnce(&mut Aggregates) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }

    // ---- ingestion side

    pub fn add_counter(&self, name: &str, delta: i64) {
        self.with(|agg| {
            let c = agg.counters.entry(name.to_string()).or_insert(0);
            *c = c.saturating_add(delta);
            agg.stats.last_message = Some(Utc::now());
        });
    }

    pub fn record_timer(&self, name: &str, value: f64) {
        self.with(|agg| {
            agg.timers.entry(name.to_string()).or_default().push(value);
            agg.stats.last_message = Some(Utc::now());
        });
    }

    pub fn set_gauge(&self, name: &str, value: f64) {
        self.with(|agg| {
            agg.gauges.insert(name.to_string(), value);
            agg.stats.last_message = Some(Utc::now());
        });
    }

    /// Count a line the ingestion path could not parse.
    pub fn record_bad_line(&self) {
        self.with(|agg| {
            agg.stats.bad_lines += 1;
            agg.stats.last_message = Some(Utc::now());
        });
    }

    // ---- flush side

    /// Swap out the accumulators for a flush.
    ///
    /// Counters and timers restart empty; gauges keep their last value and are
    /// copied into the snapshot.
    pub fn take_snapshot(&self) -> Snapshot {
        let snap = self.with(|agg| Snapshot {
            counters: mem::take(&mut agg.counters),
            timers: mem::take(&mut agg.timers),
            gauges: agg.gauges.clone(),
        });
        tracing::debug!(
            counters = snap.counters.len(),
            timers = snap.timers.len(),
            gauges = snap.gauges.len(),
            "aggregate snapshot taken"
        );
        snap
    }

    /// Record the outcome of a flush. An error is kept until the next error
    /// replaces it.
    pub fn mark_flushed(&self, outcome: std::result::Result<(), String>) {
        self.with(|agg| match outcome {
            Ok(()) => agg.stats.last_flush = Some(Utc::now()),
            Err(e) => agg.stats.last_flush_error = Some(e),
        });
    }
}
