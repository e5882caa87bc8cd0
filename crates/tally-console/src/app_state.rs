//! Shared state handed to the console server and every session.
//!
//! The aggregate store is owned by the aggregator and only referenced here.
//! The command table and metrics are built once and shared read-only.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tally_core::error::Result;
use tally_core::AggregateStore;

use crate::config::TallyConfig;
use crate::dispatch::CommandTable;
use crate::obs::ConsoleMetrics;

#[derive(Clone)]
pub struct ConsoleState {
    inner: Arc<ConsoleStateInner>,
}

struct ConsoleStateInner {
    cfg: TallyConfig,
    store: AggregateStore,
    commands: CommandTable,
    metrics: ConsoleMetrics,
    next_session_id: AtomicU64,
}

impl ConsoleState {
    /// Validates `cfg` so programmatic callers get the same checks as the
    /// file loader.
    pub fn new(cfg: TallyConfig, store: AggregateStore) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            inner: Arc::new(ConsoleStateInner {
                cfg,
                store,
                commands: CommandTable::new(),
                metrics: ConsoleMetrics::default(),
                next_session_id: AtomicU64::new(1),
            }),
        })
    }

    pub fn prompt(&self) -> &str {
        &self.inner.cfg.console.prompt
    }

    pub fn store(&self) -> &AggregateStore {
        &self.inner.store
    }

    pub fn commands(&self) -> &CommandTable {
        &self.inner.commands
    }

    pub fn metrics(&self) -> &ConsoleMetrics {
        &self.inner.metrics
    }

    pub fn next_session_id(&self) -> u64 {
        self.inner.next_session_id.fetch_add(1, Ordering::Relaxed)
    }
}
