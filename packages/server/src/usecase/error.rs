//! UseCase 層のエラー定義

use thiserror::Error;

/// 接続処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// 同じ接続 ID が既に登録されている
    #[error("Connection id '{0}' is already registered")]
    DuplicateConnectionId(String),
}

/// メッセージ送信処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// 送信者がレジストリに存在しない（切断済み）
    #[error("Sender '{0}' is not connected")]
    UnknownSender(String),
}
