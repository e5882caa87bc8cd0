use std::collections::HashMap;

use super::command::Command;

/// Immutable name -> command map. Lookup is exact and case-sensitive.
#[derive(Debug)]
pub struct CommandTable {
    by_name: HashMap<&'static str, Command>,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandTable {
    pub fn new() -> Self {
        let by_name = Command::ALL.iter().map(|c| (c.name(), *c)).collect();
        Self { by_name }
    }

    pub fn lookup(&self, name: &str) -> Option<Command> {
        self.by_name.get(name).copied()
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut v: Vec<_> = self.by_name.keys().copied().collect();
        v.sort_unstable();
        v
    }
}
