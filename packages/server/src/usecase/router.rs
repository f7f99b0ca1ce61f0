//! EventRouter: 受信イベントのディスパッチ
//!
//! 各 ClientEvent を対応するユースケースに振り分けます。ディスパッチはゲート
//! （`Mutex<()>`）で直列化され、1 イベントずつ「状態の変更 → 配信先の計算 →
//! 配信キューへの投入」を完了させてから次のイベントを処理します。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 配信テーブル（join / load / play / pause / seek / send / disconnect）
//! - 検証エラーの扱い（送信者のみに error、不正なチャットは黙って破棄）
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 接続による視聴パーティーの一連の流れ
//! - 異常系：不正な URL、長すぎるメッセージ、空メッセージ、不正なチャットイベント

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, ClientEvent, ConnectionId, Departure, MessagePusher, PusherChannel,
    RoomRepository, ServerEvent, ValidationError,
};

use super::{
    control_playback::ControlPlaybackUseCase, join_room::JoinRoomUseCase,
    leave_room::LeaveRoomUseCase, load_video::LoadVideoUseCase,
    send_message::SendMessageUseCase,
};

pub struct EventRouter {
    /// ディスパッチを 1 イベントずつに制限するゲート
    gate: Mutex<()>,
    message_pusher: Arc<dyn MessagePusher>,
    join_room_usecase: JoinRoomUseCase,
    leave_room_usecase: LeaveRoomUseCase,
    load_video_usecase: LoadVideoUseCase,
    control_playback_usecase: ControlPlaybackUseCase,
    send_message_usecase: SendMessageUseCase,
}

impl EventRouter {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            gate: Mutex::new(()),
            join_room_usecase: JoinRoomUseCase::new(repository.clone(), message_pusher.clone()),
            leave_room_usecase: LeaveRoomUseCase::new(repository.clone(), message_pusher.clone()),
            load_video_usecase: LoadVideoUseCase::new(repository.clone(), message_pusher.clone()),
            control_playback_usecase: ControlPlaybackUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            ),
            send_message_usecase: SendMessageUseCase::new(repository, message_pusher.clone()),
            message_pusher,
        }
    }

    /// 新しい接続を配信先として登録
    pub async fn connect(&self, connection_id: ConnectionId, channel: PusherChannel) {
        self.message_pusher
            .register_client(connection_id, channel)
            .await;
    }

    /// 検証済みのイベントを処理
    pub async fn dispatch(&self, sender: ConnectionId, event: ClientEvent) {
        let _turn = self.gate.lock().await;

        match event {
            ClientEvent::JoinRoom { room_id, username } => {
                if let Err(e) = self
                    .join_room_usecase
                    .execute(sender, room_id, username)
                    .await
                {
                    tracing::warn!("Join by '{}' was not fully delivered: {}", sender, e);
                }
            }
            ClientEvent::LoadVideo { room_id, video_url } => {
                self.load_video_usecase
                    .execute(sender, room_id, video_url)
                    .await;
            }
            ClientEvent::Playback { room_id, command } => {
                self.control_playback_usecase
                    .execute(sender, room_id, command)
                    .await;
            }
            ClientEvent::SendMessage {
                room_id,
                username,
                message,
                timestamp,
            } => {
                let message = ChatMessage::new(username, message, timestamp);
                self.send_message_usecase
                    .execute(sender, room_id, message)
                    .await;
            }
        }
    }

    /// 検証に失敗したイベントを送信者にのみ通知（長すぎる場合を除き、チャットは通知しない）
    pub async fn reject(&self, sender: ConnectionId, error: ValidationError) {
        if !error.is_reported() {
            tracing::debug!("Dropping event from '{}': {}", sender, error);
            return;
        }

        tracing::warn!("Rejected event from '{}': {}", sender, error);
        let event = ServerEvent::Error {
            message: error.to_string(),
        };
        if let Err(e) = self.message_pusher.push_to(&sender, &event).await {
            tracing::warn!("Failed to report error to '{}': {}", sender, e);
        }
    }

    /// 切断（トランスポートから発生する暗黙のイベント）
    pub async fn disconnect(&self, connection_id: &ConnectionId) -> Option<Departure> {
        let _turn = self.gate.lock().await;
        self.leave_room_usecase.execute(connection_id).await
    }
}
