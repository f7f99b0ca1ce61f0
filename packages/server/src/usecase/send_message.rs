//! UseCase: チャットメッセージ送信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージ履歴への追加と、送信者を含む全員への receive-message 配信
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - エッジケース：存在しない Room（no-op）
//!
//! 空メッセージ・文字数超過は ClientEvent への変換時に弾かれるため、ここには届きません。

use std::sync::Arc;

use crate::domain::{
    ChatMessage, ConnectionId, MessagePusher, RoomId, RoomRepository, ServerEvent,
};

use super::fan_out::fan_out;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Some(targets)` - receive-message の配信先（送信者を含む）
    /// * `None` - Room が存在しない（何もしない）
    pub async fn execute(
        &self,
        sender: ConnectionId,
        room_id: RoomId,
        message: ChatMessage,
    ) -> Option<Vec<ConnectionId>> {
        // 1. Repository 経由でメッセージを Room に追加
        let Some(members) = self
            .repository
            .append_message(&room_id, message.clone())
            .await
        else {
            tracing::debug!("Room '{}' does not exist, dropping message", room_id);
            return None;
        };

        tracing::info!(
            "Message from '{}' in room '{}': {}",
            message.username,
            room_id,
            message.message.as_str()
        );

        // 2. 送信者を含む全員にブロードキャスト
        let event = ServerEvent::ReceiveMessage(message);
        Some(fan_out(self.message_pusher.as_ref(), &sender, members, event).await)
    }
}
