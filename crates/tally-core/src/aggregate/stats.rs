use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};

/// Pipeline statistics. Written by ingestion/flush, read by the console.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    /// Lines the ingestion path could not parse. Never decreases.
    pub bad_lines: u64,
    pub last_message: Option<DateTime<Utc>>,
    pub last_flush: Option<DateTime<Utc>>,
    pub last_flush_error: Option<String>,
}

impl Stats {
    /// Console rendering of the stats record.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Invalid messages received: {}", self.bad_lines);
        let _ = writeln!(out, "Last message received: {}", fmt_time(self.last_message));
        let _ = writeln!(out, "Last flush to Graphite: {}", fmt_time(self.last_flush));
        let _ = writeln!(
            out,
            "Last error from Graphite: {}",
            self.last_flush_error.as_deref().unwrap_or("none")
        );
        out
    }
}

fn fmt_time(t: Option<DateTime<Utc>>) -> String {
    match t {
        Some(t) => t.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => "never".to_string(),
    }
}
