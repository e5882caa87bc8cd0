//! Minimal labelled metrics registry for the console.
//!
//! Labels are flattened into sorted key vectors to keep deterministic
//! ordering within one series set.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

type LabelKey = Vec<(String, String)>;

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn write_series(out: &mut String, name: &str, key: &LabelKey, val: impl std::fmt::Display) {
    if key.is_empty() {
        let _ = writeln!(out, "{} {}", name, val);
        return;
    }
    let label_str = key
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            write_series(out, name, r.key(), r.value().load(Ordering::Relaxed));
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicI64>,
}

impl GaugeVec {
    pub fn inc(&self, labels: &[(&str, &str)]) { self.add(labels, 1); }
    pub fn dec(&self, labels: &[(&str, &str)]) { self.add(labels, -1); }

    pub fn add(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0));
        gauge.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> i64 {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} gauge", name);
        for r in self.map.iter() {
            write_series(out, name, r.key(), r.value().load(Ordering::Relaxed));
        }
    }
}

#[derive(Default)]
pub struct ConsoleMetrics {
    pub sessions_accepted: CounterVec,
    pub sessions_active: GaugeVec,
    pub commands: CounterVec,
    pub unrecognized_commands: CounterVec,
    pub bytes_written: CounterVec,
}

impl ConsoleMetrics {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.sessions_accepted.render("tally_console_sessions_accepted_total", &mut out);
        self.sessions_active.render("tally_console_sessions_active", &mut out);
        self.commands.render("tally_console_commands_total", &mut out);
        self.unrecognized_commands.render("tally_console_unrecognized_commands_total", &mut out);
        self.bytes_written.render("tally_console_bytes_written_total", &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labelled_and_bare_series_render() {
        let m = ConsoleMetrics::default();
        m.sessions_accepted.inc(&[]);
        m.commands.inc(&[("command", "help")]);
        m.commands.add(&[("command", "help")], 2);
        m.sessions_active.inc(&[]);
        m.sessions_active.dec(&[]);

        let out = m.render();
        assert!(out.contains("tally_console_sessions_accepted_total 1\n"));
        assert!(out.contains("tally_console_commands_total{command=\"help\"} 3\n"));
        assert!(out.contains("tally_console_sessions_active 0\n"));
        assert_eq!(m.commands.get(&[("command", "help")]), 3);
        assert_eq!(m.commands.get(&[("command", "quit")]), 0);
    }

    #[test]
    fn label_values_are_escaped() {
        assert_eq!(escape_label("a\"b\\c\nd"), "a\\\"b\\\\c\\nd");
    }
}
