//! Repository trait 定義
//!
//! ドメイン層が必要とする Room ストアへのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドは 1 回の呼び出しで状態変更と配信対象の取得をまとめて行うため、
//! 同じ Room に対する変更が途中で割り込まれることはありません。

use async_trait::async_trait;

use super::{
    ChatMessage, ConnectionId, Departure, JoinOutcome, PlaybackCommand, RegistryStats, Room,
    RoomId, Username, VideoUrl,
};

/// Room Repository trait
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 参加者を Room に追加（Room が無ければ作成）
    async fn join(
        &self,
        room_id: RoomId,
        connection_id: ConnectionId,
        username: Username,
    ) -> JoinOutcome;

    /// 接続を所属 Room から削除（空になった Room は破棄）
    async fn leave(&self, connection_id: &ConnectionId) -> Option<Departure>;

    /// 動画をロードし、Room のメンバーを返す
    async fn load_video(&self, room_id: &RoomId, video_url: VideoUrl)
    -> Option<Vec<ConnectionId>>;

    /// play / pause / seek を適用し、Room のメンバーを返す
    async fn apply_playback(
        &self,
        room_id: &RoomId,
        command: PlaybackCommand,
    ) -> Option<Vec<ConnectionId>>;

    /// メッセージを追加し、Room のメンバーを返す
    async fn append_message(
        &self,
        room_id: &RoomId,
        message: ChatMessage,
    ) -> Option<Vec<ConnectionId>>;

    /// Room を取得
    async fn get_room(&self, room_id: &RoomId) -> Option<Room>;

    /// 全ての Room を取得
    async fn get_rooms(&self) -> Vec<Room>;

    /// Room 数と接続ユーザー数
    async fn stats(&self) -> RegistryStats;
}
