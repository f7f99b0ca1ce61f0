//! UseCase: 動画のロード
//!
//! ロードは再生位置と再生状態を必ずリセットし、送信者を含む Room 全員に
//! video-loaded を配信します。URL の検証は ClientEvent への変換時に済んでいます。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomId, RoomRepository, ServerEvent, VideoUrl};

use super::fan_out::fan_out;

/// 動画ロードのユースケース
pub struct LoadVideoUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LoadVideoUseCase {
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
    /// * `Some(targets)` - video-loaded の配信先
    /// * `None` - Room が存在しない（何もしない）
    pub async fn execute(
        &self,
        sender: ConnectionId,
        room_id: RoomId,
        video_url: VideoUrl,
    ) -> Option<Vec<ConnectionId>> {
        let Some(members) = self
            .repository
            .load_video(&room_id, video_url.clone())
            .await
        else {
            tracing::debug!("Room '{}' does not exist, dropping load-video", room_id);
            return None;
        };

        tracing::info!("Loading video in room '{}': {}", room_id, video_url.as_str());
        let event = ServerEvent::VideoLoaded { video_url };
        Some(fan_out(self.message_pusher.as_ref(), &sender, members, event).await)
    }
}
