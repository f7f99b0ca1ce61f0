//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::MessagePushError;

/// join-room のエラー
#[derive(Debug, Error)]
pub enum JoinRoomError {
    /// 参加者への room-state の配信に失敗（参加自体は完了している）
    #[error("Failed to deliver room state: {0}")]
    RoomStateNotDelivered(#[from] MessagePushError),
}
