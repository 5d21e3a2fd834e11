//! Hiroba CLI chat client library.
//!
//! [`session::ClientSession`] holds the per-connection state machine and the
//! local message list; [`runner::run_client`] wires it to a WebSocket and a
//! line editor.

pub mod error;
pub mod runner;
pub mod session;

// Re-export entry point
pub use runner::{DEFAULT_URL, run_client};
