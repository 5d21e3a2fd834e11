//! Handler modules for HTTP and WebSocket endpoints.

pub mod dispatch;
pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{get_presence, health_check};

// Re-export WebSocket handlers
pub use dispatch::{DispatchError, dispatch, parse_frame};
pub use websocket::websocket_handler;
