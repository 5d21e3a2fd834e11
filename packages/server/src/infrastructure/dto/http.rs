//! HTTP API response DTOs for the chat application.

use serde::{Deserialize, Serialize};

/// One connected user for the presence endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceDto {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub connected_at: String, // ISO 8601
}
