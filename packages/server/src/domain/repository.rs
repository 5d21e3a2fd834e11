//! Repository trait for the presence registry.
//!
//! The domain defines the interface; `infrastructure::repository` provides
//! the implementation (dependency inversion).

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{ConnectionId, Presence, RepositoryError, Timestamp, UserProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// Register a profile together with the outbound channel of its connection
    async fn add_presence(
        &self,
        profile: UserProfile,
        sender: UnboundedSender<String>,
        connected_at: Timestamp,
    ) -> Result<(), RepositoryError>;

    /// Remove a connection; returns whether anything was removed
    async fn remove_presence(&self, id: &ConnectionId) -> bool;

    /// Profile for a connected id
    async fn find_profile(&self, id: &ConnectionId) -> Option<UserProfile>;

    /// All registry entries sorted by id
    async fn list_presences(&self) -> Vec<Presence>;

    /// Ids of every connection that currently has an outbound channel
    async fn get_all_connected_ids(&self) -> Vec<ConnectionId>;

    async fn count_presences(&self) -> usize;
}
