//! tally console library entry.
//!
//! Wires configuration, the command table, the TCP console server and the
//! optional ops HTTP surface around a shared `AggregateStore`. Consumed by the
//! binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod obs;
pub mod ops;
pub mod router;
pub mod transport;

pub use app_state::ConsoleState;
pub use transport::ConsoleServer;
