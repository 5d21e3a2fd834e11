//! Client-side session state.
//!
//! Tracks the connection lifecycle `Disconnected -> Connecting -> Connected ->
//! Disconnected`, the connection id the server assigned, and the messages
//! received so far in arrival order.

use hiroba_server::infrastructure::dto::websocket::{
    ClientEvent, PartialUser, ReceiveMessagePayload, SendMessagePayload, ServerEvent,
};
use hiroba_shared::time::now_rfc3339;

use crate::error::SessionError;

/// Connection state of a client session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    /// Server acknowledged the session and assigned `id`
    Connected { id: String },
}

impl ConnectionState {
    fn label(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected { .. } => "connected",
        }
    }
}

/// One client's view of the room
#[derive(Debug)]
pub struct ClientSession {
    state: ConnectionState,
    /// Append-only, arrival order, never deduplicated
    messages: Vec<ReceiveMessagePayload>,
}

impl ClientSession {
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            messages: Vec::new(),
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Id assigned by the server, once connected
    pub fn own_id(&self) -> Option<&str> {
        match &self.state {
            ConnectionState::Connected { id } => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn messages(&self) -> &[ReceiveMessagePayload] {
        &self.messages
    }

    /// `Disconnected -> Connecting`. Starts from an empty message list.
    pub fn begin_connect(&mut self) -> Result<(), SessionError> {
        if self.state != ConnectionState::Disconnected {
            return Err(self.invalid("begin_connect"));
        }
        self.messages.clear();
        self.state = ConnectionState::Connecting;
        Ok(())
    }

    /// Apply an event from the server.
    ///
    /// `connect` moves `Connecting -> Connected`. `receive_message` is
    /// appended to the local list and returned.
    pub fn handle_event(
        &mut self,
        event: ServerEvent,
    ) -> Result<Option<&ReceiveMessagePayload>, SessionError> {
        match event {
            ServerEvent::Connect(payload) => {
                if self.state != ConnectionState::Connecting {
                    return Err(self.invalid("connect"));
                }
                self.state = ConnectionState::Connected { id: payload.id };
                Ok(None)
            }
            ServerEvent::ReceiveMessage(payload) => {
                if self.own_id().is_none() {
                    return Err(self.invalid("receive_message"));
                }
                self.messages.push(payload);
                Ok(self.messages.last())
            }
        }
    }

    /// `Connecting | Connected -> Disconnected`. The message list is kept
    /// until the next `begin_connect`.
    pub fn disconnect(&mut self) -> Result<(), SessionError> {
        if self.state == ConnectionState::Disconnected {
            return Err(self.invalid("disconnect"));
        }
        self.state = ConnectionState::Disconnected;
        Ok(())
    }

    /// Whether `message` was sent by this session
    pub fn is_mine(&self, message: &ReceiveMessagePayload) -> bool {
        self.own_id() == Some(message.user.id.as_str())
    }

    /// Build the `send_message` event for `content`.
    ///
    /// Returns `None` for empty or whitespace-only content, or when not connected.
    pub fn compose(&self, content: &str) -> Option<ClientEvent> {
        if content.trim().is_empty() {
            return None;
        }
        let id = self.own_id()?;
        Some(ClientEvent::SendMessage(SendMessagePayload {
            content: content.to_string(),
            timestamp: now_rfc3339(),
            user: Some(PartialUser {
                id: Some(id.to_string()),
            }),
            extra: Default::default(),
        }))
    }

    fn invalid(&self, event: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            state: self.state.label(),
            event,
        }
    }
}

impl Default for ClientSession {
    fn default() -> Self {
        Self::new()
    }
}
