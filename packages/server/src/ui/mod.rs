//! WebSocket chat server implementation.

pub mod handler;
mod runner;
mod signal;
pub mod state; // Infrastructure 層の Repository からアクセスするため public

pub use runner::{DEFAULT_PORT, create_app, run, serve};
