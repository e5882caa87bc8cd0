//! Console wire protocol primitives.
//!
//! The console speaks newline-terminated, human-typed text:
//! `<command-name> [arg1 arg2 ...]\n`. Arguments are whitespace-split tokens
//! with no quoting or escaping. Decoding never panics; malformed bytes are
//! replaced rather than rejected so an operator typo cannot kill a session.

pub mod command_line;
pub mod line;

pub use command_line::CommandLine;
pub use line::LineDecoder;
