//! UseCase: ユーザー接続処理
//!
//! 新しい接続にプロフィール（表示名・アバター）を割り当て、レジストリに登録します。
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続にプロフィールが割り当てられる
//! - 異常系：重複した接続 ID での登録試行
//! - エッジケース：切断後に別 ID で接続した場合は独立したプロフィールになる

use std::sync::Arc;

use hiroba_shared::time::get_utc_timestamp;
use rand::Rng;
use tokio::sync::mpsc::UnboundedSender;

use crate::domain::{
    ConnectionId, PresenceRepository, ProfileFactory, RegistryError, RepositoryError, Timestamp,
    UserProfile,
};

use super::error::ConnectError;

/// ユーザー接続のユースケース
pub struct ConnectUserUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn PresenceRepository>,
}

impl ConnectUserUseCase {
    /// 新しい ConnectUserUseCase を作成
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// ユーザー接続を実行（スレッドローカルな乱数で表示名を選ぶ）
    ///
    /// # Arguments
    ///
    /// * `id` - 接続 ID（Domain Model）
    /// * `sender` - この接続へのメッセージ送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(UserProfile)` - 割り当てられたプロフィール
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        id: ConnectionId,
        sender: UnboundedSender<String>,
    ) -> Result<UserProfile, ConnectError> {
        let profile = ProfileFactory::generate(id, &mut rand::rng());
        self.register(profile, sender).await
    }

    /// 乱数源を指定してユーザー接続を実行
    pub async fn execute_with_rng<R: Rng + ?Sized>(
        &self,
        id: ConnectionId,
        sender: UnboundedSender<String>,
        rng: &mut R,
    ) -> Result<UserProfile, ConnectError> {
        let profile = ProfileFactory::generate(id, rng);
        self.register(profile, sender).await
    }

    async fn register(
        &self,
        profile: UserProfile,
        sender: UnboundedSender<String>,
    ) -> Result<UserProfile, ConnectError> {
        let connected_at = Timestamp::new(get_utc_timestamp());
        self.repository
            .add_presence(profile.clone(), sender, connected_at)
            .await
            .map_err(|e| match e {
                RepositoryError::Registry(RegistryError::DuplicateConnection(id)) => {
                    ConnectError::DuplicateConnectionId(id)
                }
            })?;

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DISPLAY_NAMES, MockPresenceRepository, PresenceRegistry},
        infrastructure::repository::InMemoryPresenceRepository,
    };
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashMap;
    use tokio::sync::{Mutex, mpsc};

    fn create_test_repository() -> Arc<InMemoryPresenceRepository> {
        Arc::new(InMemoryPresenceRepository::new(
            Arc::new(Mutex::new(HashMap::new())),
            Arc::new(Mutex::new(PresenceRegistry::new())),
        ))
    }

    #[tokio::test]
    async fn test_connect_user_success() {
        // テスト項目: 新規接続にプロフィールが割り当てられ、レジストリに登録される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = ConnectUserUseCase::new(repository.clone());
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let id = ConnectionId::new("abc123".to_string()).unwrap();
        let profile = usecase.execute(id.clone(), tx).await.unwrap();

        // then (期待する結果):
        assert_eq!(profile.id, id);
        assert!(DISPLAY_NAMES.contains(&profile.name.as_str()));
        assert_eq!(profile.avatar, "https://robohash.org/abc123?set=set4");
        assert_eq!(repository.count_presences().await, 1);
        assert_eq!(repository.find_profile(&id).await, Some(profile));
    }

    #[tokio::test]
    async fn test_connect_user_with_seeded_rng_is_deterministic() {
        // テスト項目: 同じシードの乱数源なら同じ表示名が割り当てられる
        // given (前提条件):
        let usecase1 = ConnectUserUseCase::new(create_test_repository());
        let usecase2 = ConnectUserUseCase::new(create_test_repository());
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let id = ConnectionId::new("abc123".to_string()).unwrap();

        // when (操作):
        let profile1 = usecase1
            .execute_with_rng(id.clone(), tx1, &mut StdRng::seed_from_u64(3))
            .await
            .unwrap();
        let profile2 = usecase2
            .execute_with_rng(id.clone(), tx2, &mut StdRng::seed_from_u64(3))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(profile1, profile2);
    }

    #[tokio::test]
    async fn test_connect_user_duplicate_error() {
        // テスト項目: 重複した接続 ID での登録がエラーになる
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = ConnectUserUseCase::new(repository.clone());
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let id = ConnectionId::new("abc123".to_string()).unwrap();
        usecase.execute(id.clone(), tx1).await.unwrap();

        // when (操作):
        let result = usecase.execute(id, tx2).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConnectError::DuplicateConnectionId("abc123".to_string()))
        );
        assert_eq!(repository.count_presences().await, 1);
    }

    #[tokio::test]
    async fn test_connect_user_maps_repository_error() {
        // テスト項目: Repository のエラーが ConnectError に変換される
        // given (前提条件):
        let mut repository = MockPresenceRepository::new();
        repository.expect_add_presence().times(1).returning(|p, _, _| {
            Err(RepositoryError::Registry(RegistryError::DuplicateConnection(
                p.id.into_string(),
            )))
        });
        let usecase = ConnectUserUseCase::new(Arc::new(repository));
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let id = ConnectionId::new("zzz".to_string()).unwrap();
        let result = usecase.execute(id, tx).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConnectError::DuplicateConnectionId("zzz".to_string()))
        );
    }

    #[tokio::test]
    async fn test_reconnect_gets_fresh_profile() {
        // テスト項目: 切断後に新しい ID で接続すると、前のプロフィールとは独立したプロフィールになる
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = ConnectUserUseCase::new(repository.clone());
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let old_id = ConnectionId::new("old".to_string()).unwrap();
        usecase.execute(old_id.clone(), tx1).await.unwrap();
        repository.remove_presence(&old_id).await;

        // when (操作):
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let new_id = ConnectionId::new("new".to_string()).unwrap();
        let profile = usecase.execute(new_id.clone(), tx2).await.unwrap();

        // then (期待する結果):
        assert!(repository.find_profile(&old_id).await.is_none());
        assert_eq!(profile.id, new_id);
        assert_eq!(profile.avatar, "https://robohash.org/new?set=set4");
        assert_eq!(repository.count_presences().await, 1);
    }
}
