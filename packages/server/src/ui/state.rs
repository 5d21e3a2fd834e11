//! Server state and connection management.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{ConnectionId, PresenceRegistry, PresenceRepository},
    infrastructure::repository::InMemoryPresenceRepository,
};

/// Client connection information
pub struct ClientInfo {
    /// Outbound message channel drained by the connection's writer task
    pub sender: mpsc::UnboundedSender<String>,
    /// Unix timestamp when connected (UTC, milliseconds)
    pub connected_at: i64,
}

/// Shared application state, constructed once at startup
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn PresenceRepository>,
    /// Outbound channels for broadcasting (shared with the Repository)
    pub connected_clients: Arc<Mutex<HashMap<ConnectionId, ClientInfo>>>,
}

impl AppState {
    /// Build the state backed by the in-memory repository
    pub fn new() -> Self {
        let connected_clients = Arc::new(Mutex::new(HashMap::new()));
        let registry = Arc::new(Mutex::new(PresenceRegistry::new()));
        let repository = Arc::new(InMemoryPresenceRepository::new(
            connected_clients.clone(),
            registry,
        ));

        Self {
            repository,
            connected_clients,
        }
    }

    /// Enqueue `payload` on the channel of every target that is still connected.
    ///
    /// Returns the number of channels the payload was queued on. Targets that
    /// have gone away are skipped.
    pub async fn deliver(&self, targets: &[ConnectionId], payload: &str) -> usize {
        let clients = self.connected_clients.lock().await;
        let mut delivered = 0;
        for target_id in targets {
            match clients.get(target_id) {
                Some(client_info) => {
                    if client_info.sender.send(payload.to_string()).is_err() {
                        tracing::warn!("Failed to send message to client '{}'", target_id);
                    } else {
                        delivered += 1;
                    }
                }
                None => {
                    tracing::debug!("Skipping client '{}': no longer connected", target_id);
                }
            }
        }
        delivered
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
