//! UseCase: メッセージ送信処理（ブロードキャストリレー）
//!
//! ### 何をしているか
//! - 送信者のプロフィールをレジストリから取得する
//! - クライアントが送ってきた user は捨て、レジストリのプロフィールを付与したメッセージを作る
//! - 送信者自身を含む、送信時点で接続中の全クライアントを配信対象とする
//!
//! メッセージは保存しません。内容の検証（空文字の拒否など）もしません。

use std::sync::Arc;

use crate::domain::{ChatMessage, ConnectionId, PresenceRepository, SentAt};

use super::error::SendMessageError;

/// 1回のブロードキャストの内容と配信対象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broadcast {
    /// 送信者プロフィール付きのメッセージ
    pub message: ChatMessage,
    /// 配信対象の接続 ID（送信者を含む、順序は不定）
    pub recipients: Vec<ConnectionId>,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn PresenceRepository>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `sender_id` - 送信者の接続 ID（Domain Model）
    /// * `content` - メッセージ本文（そのまま中継する）
    /// * `timestamp` - クライアントが付けた送信時刻
    ///
    /// # Returns
    ///
    /// * `Ok(Broadcast)` - メッセージと配信対象
    /// * `Err(SendMessageError)` - 送信者が既に切断済み
    pub async fn execute(
        &self,
        sender_id: &ConnectionId,
        content: String,
        timestamp: SentAt,
    ) -> Result<Broadcast, SendMessageError> {
        let profile = self
            .repository
            .find_profile(sender_id)
            .await
            .ok_or_else(|| SendMessageError::UnknownSender(sender_id.as_str().to_string()))?;

        let message = ChatMessage::new(content, timestamp, profile);
        let recipients = self.repository.get_all_connected_ids().await;

        Ok(Broadcast {
            message,
            recipients,
        })
    }
}
