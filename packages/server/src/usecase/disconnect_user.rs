//! UseCase: ユーザー切断処理
//!
//! 切断した接続のプロフィールをレジストリから削除します。
//! 存在しない ID の切断は何もしない（冪等）。

use std::sync::Arc;

use crate::domain::{ConnectionId, PresenceRepository};

/// ユーザー切断のユースケース
pub struct DisconnectUserUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn PresenceRepository>,
}

impl DisconnectUserUseCase {
    /// 新しい DisconnectUserUseCase を作成
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// ユーザー切断を実行
    ///
    /// # Returns
    ///
    /// 実際に削除した場合は `true`、既に存在しなかった場合は `false`
    pub async fn execute(&self, id: &ConnectionId) -> bool {
        self.repository.remove_presence(id).await
    }

    /// 残りの接続数を取得
    pub async fn count_remaining_users(&self) -> usize {
        self.repository.count_presences().await
    }
}
