//! Transport layer (TCP console).
//!
//! `server` owns the listener and spawns one task per connection; `session`
//! runs the read-dispatch-write loop for a single client.

pub mod server;
pub mod session;

pub use server::{resolve_listen_addr, ConsoleServer};
pub use session::run_session;
