//! Hiroba chat server library.
//!
//! A single shared room: every connection is given a generated profile on
//! connect, and every message is relayed to all connections, the sender
//! included.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry point
pub use ui::run as run_server;
