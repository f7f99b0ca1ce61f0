//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! `SessionRegistry` を 1 つの Mutex で保護し、各操作を 1 回のロック内で完結させます。
//! サーバー停止とともに全ての状態は破棄されます。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, ConnectionId, Departure, JoinOutcome, PlaybackCommand, RegistryStats, Room,
    RoomId, RoomRepository, SessionRegistry, Username, VideoUrl,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    registry: Mutex<SessionRegistry>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(registry: SessionRegistry) -> Self {
        Self {
            registry: Mutex::new(registry),
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn join(
        &self,
        room_id: RoomId,
        connection_id: ConnectionId,
        username: Username,
    ) -> JoinOutcome {
        let mut registry = self.registry.lock().await;
        registry.join(room_id, connection_id, username)
    }

    async fn leave(&self, connection_id: &ConnectionId) -> Option<Departure> {
        let mut registry = self.registry.lock().await;
        registry.leave(connection_id)
    }

    async fn load_video(
        &self,
        room_id: &RoomId,
        video_url: VideoUrl,
    ) -> Option<Vec<ConnectionId>> {
        let mut registry = self.registry.lock().await;
        registry.load_video(room_id, video_url)
    }

    async fn apply_playback(
        &self,
        room_id: &RoomId,
        command: PlaybackCommand,
    ) -> Option<Vec<ConnectionId>> {
        let mut registry = self.registry.lock().await;
        registry.apply_playback(room_id, command)
    }

    async fn append_message(
        &self,
        room_id: &RoomId,
        message: ChatMessage,
    ) -> Option<Vec<ConnectionId>> {
        let mut registry = self.registry.lock().await;
        registry.append_message(room_id, message)
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<Room> {
        let registry = self.registry.lock().await;
        registry.room(room_id).cloned()
    }

    async fn get_rooms(&self) -> Vec<Room> {
        let registry = self.registry.lock().await;
        let mut rooms: Vec<Room> = registry.rooms().cloned().collect();
        rooms.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        rooms
    }

    async fn stats(&self) -> RegistryStats {
        let registry = self.registry.lock().await;
        registry.stats()
    }
}
