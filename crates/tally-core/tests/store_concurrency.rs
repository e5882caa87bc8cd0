//! Lock-invariant stress tests for the shared aggregate store.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tally_core::AggregateStore;

/// The writer inserts a counter and its matching gauge inside one critical
/// section (and deleters remove both together). Any reader holding the lock
/// must therefore see the two maps with identical key sets.
#[test]
fn readers_never_observe_half_applied_writes() {
    let store = AggregateStore::new();
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let store = store.clone();
        thread::spawn(move || {
            for i in 0..1000 {
                store.with(|agg| {
                    let k = format!("metric.{i}");
                    agg.counters.insert(k.clone(), i);
                    agg.gauges.insert(k, i as f64);
                });
            }
        })
    };

    let deleter = {
        let store = store.clone();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut i = 0;
            while !done.load(Ordering::Relaxed) {
                store.with(|agg| {
                    let k = format!("metric.{i}");
                    agg.counters.remove(&k);
                    agg.gauges.remove(&k);
                });
                i = (i + 7) % 1000;
            }
        })
    };

    let readers: Vec<_> = (0..2)
        .map(|_| {
            let store = store.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut checks = 0u64;
                while !done.load(Ordering::Relaxed) {
                    let agg = store.lock();
                    assert_eq!(agg.counters.len(), agg.gauges.len());
                    for k in agg.counters.keys() {
                        assert!(agg.gauges.contains_key(k), "gauge missing for {k}");
                    }
                    checks += 1;
                }
                checks
            })
        })
        .collect();

    writer.join().unwrap();
    done.store(true, Ordering::Relaxed);
    deleter.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }

    let agg = store.lock();
    assert_eq!(agg.counters.len(), agg.gauges.len());
}

#[test]
fn concurrent_ingestion_loses_no_increments() {
    let store = AggregateStore::new();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                for _ in 0..250 {
                    store.add_counter("shared", 1);
                    store.record_timer("lat", 1.0);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let agg = store.lock();
    assert_eq!(agg.counters["shared"], 1000);
    assert_eq!(agg.timers["lat"].len(), 1000);
}
