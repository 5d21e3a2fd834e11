//! InMemory Presence Repository 実装
//!
//! ドメイン層が定義する PresenceRepository trait の具体的な実装。
//! `PresenceRegistry`（プロフィール）と接続中クライアントの送信チャンネルを
//! それぞれ Mutex で保護して保持します。
//!
//! ロックは同時に1つしか取らない（ネストしない）ことでデッドロックを避けます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::{
    domain::{
        ConnectionId, Presence, PresenceRegistry, PresenceRepository, RepositoryError, Timestamp,
        UserProfile,
    },
    ui::state::ClientInfo,
};

/// インメモリ Presence Repository 実装
pub struct InMemoryPresenceRepository {
    /// 接続中のクライアント情報（WebSocket sender を含む）
    connected_clients: Arc<Mutex<HashMap<ConnectionId, ClientInfo>>>,
    /// プレゼンスレジストリ（ドメインモデル）
    registry: Arc<Mutex<PresenceRegistry>>,
}

impl InMemoryPresenceRepository {
    /// 新しい InMemoryPresenceRepository を作成
    pub fn new(
        connected_clients: Arc<Mutex<HashMap<ConnectionId, ClientInfo>>>,
        registry: Arc<Mutex<PresenceRegistry>>,
    ) -> Self {
        Self {
            connected_clients,
            registry,
        }
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn add_presence(
        &self,
        profile: UserProfile,
        sender: UnboundedSender<String>,
        connected_at: Timestamp,
    ) -> Result<(), RepositoryError> {
        let id = profile.id.clone();

        // レジストリへの登録が成功した場合のみ送信チャンネルを登録する
        {
            let mut registry = self.registry.lock().await;
            registry.connect(Presence::new(profile, connected_at))?;
        }

        let mut clients = self.connected_clients.lock().await;
        clients.insert(
            id,
            ClientInfo {
                sender,
                connected_at: connected_at.value(),
            },
        );

        Ok(())
    }

    async fn remove_presence(&self, id: &ConnectionId) -> bool {
        let removed_client = {
            let mut clients = self.connected_clients.lock().await;
            clients.remove(id).is_some()
        };

        let removed_presence = {
            let mut registry = self.registry.lock().await;
            registry.disconnect(id).is_some()
        };

        removed_client || removed_presence
    }

    async fn find_profile(&self, id: &ConnectionId) -> Option<UserProfile> {
        let registry = self.registry.lock().await;
        registry.lookup(id).cloned()
    }

    async fn list_presences(&self) -> Vec<Presence> {
        let registry = self.registry.lock().await;
        registry.presences()
    }

    async fn get_all_connected_ids(&self) -> Vec<ConnectionId> {
        let clients = self.connected_clients.lock().await;
        clients.keys().cloned().collect()
    }

    async fn count_presences(&self) -> usize {
        let registry = self.registry.lock().await;
        registry.len()
    }
}
