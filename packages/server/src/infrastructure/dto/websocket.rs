//! WebSocket event DTOs for the chat application.
//!
//! Every frame is a JSON text frame of the form `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{ChatMessage, UserProfile};

/// Events sent from a client to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    SendMessage(SendMessagePayload),
}

/// Events sent from the server to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Session acknowledgement carrying the client's own connection id
    Connect(ConnectPayload),
    /// A chat message broadcast to everyone
    ReceiveMessage(ReceiveMessagePayload),
}

impl ServerEvent {
    /// Event name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Connect(_) => "connect",
            ServerEvent::ReceiveMessage(_) => "receive_message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectPayload {
    pub id: String,
}

/// Body of `send_message`.
///
/// `user` is whatever the client claims to be; the server ignores it and
/// stamps the registry profile instead. Any other fields land in `extra` and
/// are relayed untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessagePayload {
    pub content: String,
    /// ISO-8601 datetime
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<PartialUser>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Client-supplied user reference inside `send_message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialUser {
    #[serde(default)]
    pub id: Option<String>,
}

/// Body of `receive_message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveMessagePayload {
    pub content: String,
    pub timestamp: String,
    pub user: UserDto,
    /// Sender's extra fields, echoed as sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full user profile as broadcast to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl From<&UserProfile> for UserDto {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.as_str().to_string(),
            name: profile.name.clone(),
            avatar: profile.avatar.clone(),
        }
    }
}

impl From<&ChatMessage> for ReceiveMessagePayload {
    fn from(message: &ChatMessage) -> Self {
        Self {
            content: message.content.clone(),
            timestamp: message.timestamp.as_str().to_string(),
            user: UserDto::from(&message.user),
            extra: Map::new(),
        }
    }
}
