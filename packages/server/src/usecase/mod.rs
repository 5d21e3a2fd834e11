//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod connect_user;
pub mod disconnect_user;
pub mod error;
pub mod send_message;

pub use connect_user::ConnectUserUseCase;
pub use disconnect_user::DisconnectUserUseCase;
pub use error::{ConnectError, SendMessageError};
pub use send_message::{Broadcast, SendMessageUseCase};
