//! Command dispatch.
//!
//! The console command set is closed: `Command` enumerates every built-in and
//! `CommandTable` maps names to variants. The table is built once and shared
//! read-only by all sessions.

pub mod command;
pub mod table;

pub use command::{Command, Reply, FAREWELL, HELP_TEXT, UNRECOGNIZED};
pub use table::CommandTable;
