//! Core domain models for the chat application.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{
    error::RegistryError,
    value_object::{ConnectionId, SentAt, Timestamp},
};

/// Generated display identity attached to a connection for its lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Connection identifier this profile belongs to
    pub id: ConnectionId,
    /// Display name drawn from a fixed list
    pub name: String,
    /// Avatar image URL derived from the connection id
    pub avatar: String,
}

impl UserProfile {
    pub fn new(id: ConnectionId, name: String, avatar: String) -> Self {
        Self { id, name, avatar }
    }
}

/// A registry entry: the profile plus when the connection was opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presence {
    pub profile: UserProfile,
    pub connected_at: Timestamp,
}

impl Presence {
    pub fn new(profile: UserProfile, connected_at: Timestamp) -> Self {
        Self {
            profile,
            connected_at,
        }
    }
}

/// Outbound chat message, stamped with the sender's authoritative profile.
///
/// Transient: built for one broadcast and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message body, passed through as sent
    pub content: String,
    /// Client-supplied send time
    pub timestamp: SentAt,
    /// Sender profile from the registry
    pub user: UserProfile,
}

impl ChatMessage {
    pub fn new(content: String, timestamp: SentAt, user: UserProfile) -> Self {
        Self {
            content,
            timestamp,
            user,
        }
    }
}

/// Process-wide mapping from connection id to profile.
///
/// Holds exactly one entry per currently connected connection.
#[derive(Debug, Clone, Default)]
pub struct PresenceRegistry {
    entries: HashMap<ConnectionId, Presence>,
}

impl PresenceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a presence under its profile id
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateConnection` if the id is already present;
    /// the existing entry is left untouched.
    pub fn connect(&mut self, presence: Presence) -> Result<(), RegistryError> {
        let id = presence.profile.id.clone();
        if self.entries.contains_key(&id) {
            return Err(RegistryError::DuplicateConnection(id.into_string()));
        }
        self.entries.insert(id, presence);
        Ok(())
    }

    /// Remove an entry. Absent ids are ignored.
    pub fn disconnect(&mut self, id: &ConnectionId) -> Option<Presence> {
        self.entries.remove(id)
    }

    /// Profile registered for `id`, if connected
    pub fn lookup(&self, id: &ConnectionId) -> Option<&UserProfile> {
        self.entries.get(id).map(|p| &p.profile)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries sorted by connection id
    pub fn presences(&self) -> Vec<Presence> {
        let mut presences: Vec<Presence> = self.entries.values().cloned().collect();
        presences.sort_by(|a, b| a.profile.id.cmp(&b.profile.id));
        presences
    }
}
