use std::collections::HashMap;

use tally_core::aggregate::dump_map;
use tally_core::AggregateStore;

pub const HELP_TEXT: &str =
    "Commands: stats, counters, timers, gauges, delcounters, deltimers, delgauges, quit\n";
pub const FAREWELL: &str = "goodbye\n";
pub const UNRECOGNIZED: &str = "unrecognized command\n";

/// Built-in console commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Help,
    Stats,
    Counters,
    Timers,
    Gauges,
    DelCounters,
    DelTimers,
    DelGauges,
    Quit,
}

/// Handler outcome. `Close` carries the last text sent before the session
/// shuts its socket; it is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Continue(String),
    Close(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Continue(s) | Reply::Close(s) => s,
        }
    }

    pub fn closes(&self) -> bool {
        matches!(self, Reply::Close(_))
    }
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::Help,
        Command::Stats,
        Command::Counters,
        Command::Timers,
        Command::Gauges,
        Command::DelCounters,
        Command::DelTimers,
        Command::DelGauges,
        Command::Quit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Stats => "stats",
            Command::Counters => "counters",
            Command::Timers => "timers",
            Command::Gauges => "gauges",
            Command::DelCounters => "delcounters",
            Command::DelTimers => "deltimers",
            Command::DelGauges => "delgauges",
            Command::Quit => "quit",
        }
    }

    pub fn is_destructive(self) -> bool {
        matches!(
            self,
            Command::DelCounters | Command::DelTimers | Command::DelGauges
        )
    }

    /// Run the command against the store.
    ///
    /// Every variant except `Help` and `Quit` holds the store lock for the
    /// map access and formatting only; the guard is dropped before the reply
    /// is returned, so no socket I/O ever happens under the lock.
    pub fn execute(self, args: &[String], store: &AggregateStore) -> Reply {
        let text = match self {
            Command::Help => HELP_TEXT.to_string(),
            Command::Quit => return Reply::Close(FAREWELL.to_string()),
            Command::Stats => store.with(|agg| agg.stats.render()),
            Command::Counters => store.with(|agg| dump_map(&agg.counters)),
            Command::Timers => store.with(|agg| dump_map(&agg.timers)),
            Command::Gauges => store.with(|agg| dump_map(&agg.gauges)),
            Command::DelCounters => {
                let n = store.with(|agg| delete_keys(&mut agg.counters, args));
                format!("deleted {n} counters\n")
            }
            Command::DelTimers => {
                let n = store.with(|agg| delete_keys(&mut agg.timers, args));
                format!("deleted {n} timers\n")
            }
            Command::DelGauges => {
                let n = store.with(|agg| delete_keys(&mut agg.gauges, args));
                format!("deleted {n} gauges\n")
            }
        };
        Reply::Continue(text)
    }
}

/// Remove each named key. Returns the number of names processed, not the
/// number of keys that existed.
fn delete_keys<V>(map: &mut HashMap<String, V>, keys: &[String]) -> usize {
    let mut processed = 0;
    for k in keys {
        map.remove(k);
        processed += 1;
    }
    processed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn help_lists_every_command_but_help() {
        let store = AggregateStore::new();
        let reply = Command::Help.execute(&[], &store);
        for c in Command::ALL.iter().filter(|c| **c != Command::Help) {
            assert!(reply.text().contains(c.name()), "help is missing {}", c.name());
        }
        assert!(!reply.closes());
    }

    #[test]
    fn delete_counts_tokens_not_hits() {
        let store = AggregateStore::new();
        store.add_counter("present", 1);

        let reply = Command::DelCounters.execute(&args(&["present", "missing"]), &store);
        assert_eq!(reply, Reply::Continue("deleted 2 counters\n".into()));
        assert!(store.lock().counters.is_empty());
    }

    #[test]
    fn delete_missing_is_idempotent() {
        let store = AggregateStore::new();
        store.add_counter("keep", 3);

        let first = Command::DelCounters.execute(&args(&["missing"]), &store);
        let second = Command::DelCounters.execute(&args(&["missing"]), &store);
        assert_eq!(first, second);
        assert_eq!(first.text(), "deleted 1 counters\n");
        assert_eq!(store.lock().counters["keep"], 3);
    }

    #[test]
    fn delete_without_args_deletes_nothing() {
        let store = AggregateStore::new();
        store.set_gauge("g", 1.0);
        let reply = Command::DelGauges.execute(&[], &store);
        assert_eq!(reply.text(), "deleted 0 gauges\n");
        assert_eq!(store.lock().gauges.len(), 1);
    }

    #[test]
    fn deletes_target_only_their_map() {
        let store = AggregateStore::new();
        store.add_counter("x", 1);
        store.record_timer("x", 1.0);
        store.set_gauge("x", 1.0);

        let reply = Command::DelTimers.execute(&args(&["x"]), &store);
        assert_eq!(reply.text(), "deleted 1 timers\n");

        let agg = store.lock();
        assert!(agg.timers.is_empty());
        assert_eq!(agg.counters.len(), 1);
        assert_eq!(agg.gauges.len(), 1);
    }

    #[test]
    fn dumps_reflect_store_contents() {
        let store = AggregateStore::new();
        store.add_counter("hits", 4);
        store.record_timer("lat", 0.5);
        store.set_gauge("temp", 21.5);

        assert_eq!(Command::Counters.execute(&[], &store).text(), "{\"hits\":4}\n");
        assert_eq!(Command::Timers.execute(&[], &store).text(), "{\"lat\":[0.5]}\n");
        assert_eq!(Command::Gauges.execute(&[], &store).text(), "{\"temp\":21.5}\n");
    }

    #[test]
    fn stats_reads_the_record() {
        let store = AggregateStore::new();
        store.record_bad_line();
        store.record_bad_line();
        let reply = Command::Stats.execute(&[], &store);
        assert!(reply.text().starts_with("Invalid messages received: 2\n"));
    }

    #[test]
    fn quit_closes_with_farewell() {
        let store = AggregateStore::new();
        let reply = Command::Quit.execute(&args(&["ignored"]), &store);
        assert!(reply.closes());
        assert_eq!(reply.text(), FAREWELL);
    }
}
