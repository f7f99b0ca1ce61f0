//! UseCase: Room への参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加者には room-state、他のメンバーには user-joined が配信されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規 Room の作成、既存 Room への参加
//! - エッジケース：別 Room からの移動、同じ接続による再参加（リネーム）

use std::sync::Arc;

use crate::domain::{
    ConnectionId, JoinOutcome, MessagePusher, RoomId, RoomRepository, ServerEvent, Username,
};

use super::{
    error::JoinRoomError,
    fan_out::{announce_departure, fan_out},
};

/// Room 参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Room への参加を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 参加する接続
    /// * `room_id` - 参加先の Room（存在しなければ作成される）
    /// * `username` - 表示名
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 参加結果
    /// * `Err(JoinRoomError)` - room-state を参加者に届けられなかった
    pub async fn execute(
        &self,
        sender: ConnectionId,
        room_id: RoomId,
        username: Username,
    ) -> Result<JoinOutcome, JoinRoomError> {
        let outcome = self.repository.join(room_id, sender, username).await;

        // 1. 別の Room から移動してきた場合は、元の Room に退出を通知
        if let Some(previous) = &outcome.previous {
            announce_departure(self.message_pusher.as_ref(), &sender, previous).await;
        }

        // 2. 参加者に Room の全状態を送信
        let delivered = self
            .message_pusher
            .push_to(&sender, &ServerEvent::RoomState(outcome.snapshot.clone()))
            .await;

        // 3. 他のメンバーに参加を通知
        let joined = ServerEvent::UserJoined {
            username: outcome.username.clone(),
            users: outcome.snapshot.users.clone(),
        };
        fan_out(
            self.message_pusher.as_ref(),
            &sender,
            outcome.members.clone(),
            joined,
        )
        .await;

        tracing::info!(
            "'{}' joined room '{}' ({} member(s))",
            outcome.username,
            outcome.room_id,
            outcome.members.len()
        );

        delivered?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{
        connect, create_test_message_pusher, create_test_repository, drain, room_id, username,
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_join_sends_room_state_to_sender_only() {
        // テスト項目: 最初の参加者には初期状態の room-state のみが届く
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = JoinRoomUseCase::new(repository, message_pusher.clone());
        let (alice, mut alice_rx) = connect(&message_pusher).await;

        // when (操作):
        let result = usecase
            .execute(alice, room_id("r1"), username("alice"))
            .await;

        // then (期待する結果):
        assert!(result.unwrap().room_created);
        let frames = drain(&mut alice_rx);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["type"], "room-state");
        assert_eq!(frames[0]["videoUrl"], "");
        assert_eq!(frames[0]["isPlaying"], false);
        assert_eq!(frames[0]["messages"], json!([]));
        assert_eq!(frames[0]["users"], json!(["alice"]));
    }

    #[tokio::test]
    async fn test_join_notifies_existing_members() {
        // テスト項目: 既存メンバーには user-joined が届き、参加者自身には届かない
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = JoinRoomUseCase::new(repository, message_pusher.clone());
        let (alice, mut alice_rx) = connect(&message_pusher).await;
        let (bob, mut bob_rx) = connect(&message_pusher).await;
        usecase
            .execute(alice, room_id("r1"), username("alice"))
            .await
            .unwrap();
        drain(&mut alice_rx);

        // when (操作):
        usecase
            .execute(bob, room_id("r1"), username("bob"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            drain(&mut alice_rx),
            vec![json!({"type": "user-joined", "username": "bob", "users": ["alice", "bob"]})]
        );
        let bob_frames = drain(&mut bob_rx);
        assert_eq!(bob_frames.len(), 1);
        assert_eq!(bob_frames[0]["type"], "room-state");
        assert_eq!(bob_frames[0]["users"], json!(["alice", "bob"]));
    }

    #[tokio::test]
    async fn test_join_other_room_notifies_previous_room() {
        // テスト項目: 別 Room への移動時、元の Room のメンバーに user-left が届く
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = JoinRoomUseCase::new(repository.clone(), message_pusher.clone());
        let (alice, mut alice_rx) = connect(&message_pusher).await;
        let (bob, mut bob_rx) = connect(&message_pusher).await;
        usecase
            .execute(alice, room_id("r1"), username("alice"))
            .await
            .unwrap();
        usecase
            .execute(bob, room_id("r1"), username("bob"))
            .await
            .unwrap();
        drain(&mut alice_rx);
        drain(&mut bob_rx);

        // when (操作):
        usecase
            .execute(alice, room_id("r2"), username("alice"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            drain(&mut bob_rx),
            vec![json!({"type": "user-left", "username": "alice", "users": ["bob"]})]
        );
        let alice_frames = drain(&mut alice_rx);
        assert_eq!(alice_frames.len(), 1);
        assert_eq!(alice_frames[0]["users"], json!(["alice"]));
        assert_eq!(repository.stats().await.active_rooms, 2);
    }

    #[tokio::test]
    async fn test_join_reports_undeliverable_room_state() {
        // テスト項目: 未登録の接続が参加した場合、参加は完了するがエラーが返される
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = JoinRoomUseCase::new(repository.clone(), message_pusher);

        // when (操作):
        let result = usecase
            .execute(ConnectionId::generate(), room_id("r1"), username("ghost"))
            .await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(JoinRoomError::RoomStateNotDelivered(_))
        ));
        assert_eq!(repository.stats().await.total_users, 1);
    }
}
