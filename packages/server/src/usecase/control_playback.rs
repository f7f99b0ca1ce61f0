//! UseCase: play / pause / seek
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ControlPlaybackUseCase::execute() メソッド
//! - 操作した本人には配信されない（プレイヤーのフィードバックループ防止）
//!
//! ### どのような状況を想定しているか
//! - 正常系：play / pause / seek の各配信
//! - エッジケース：再生中の play（冪等）、存在しない Room（no-op）

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, PlaybackCommand, RoomId, RoomRepository, ServerEvent,
};

use super::fan_out::fan_out;

/// 再生操作のユースケース
pub struct ControlPlaybackUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ControlPlaybackUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// # Returns
    ///
    /// * `Some(targets)` - 配信先（送信者は含まない）
    /// * `None` - Room が存在しない（何もしない）
    pub async fn execute(
        &self,
        sender: ConnectionId,
        room_id: RoomId,
        command: PlaybackCommand,
    ) -> Option<Vec<ConnectionId>> {
        let Some(members) = self.repository.apply_playback(&room_id, command).await else {
            tracing::debug!(
                "Room '{}' does not exist, dropping {}-video",
                room_id,
                command.name()
            );
            return None;
        };

        tracing::info!(
            "{} video in room '{}' at timestamp {}",
            command.name(),
            room_id,
            command.position().seconds()
        );
        let event = ServerEvent::from_playback(command);
        Some(fan_out(self.message_pusher.as_ref(), &sender, members, event).await)
    }
}
