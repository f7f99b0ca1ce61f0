//! UseCase: 切断による Room からの退出
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 残りのメンバーへの user-left 通知と、最後の退出による Room の破棄
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーが残る退出
//! - エッジケース：最後のメンバーの退出、どの Room にも属さない接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, Departure, MessagePusher, RoomRepository};

use super::fan_out::announce_departure;

/// 退出のユースケース
pub struct LeaveRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断された接続を退出させる
    ///
    /// # Returns
    ///
    /// * `Some(Departure)` - 退出した Room の情報
    /// * `None` - どの Room にも属していなかった
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Departure> {
        // 1. 配信先から登録解除
        self.message_pusher.unregister_client(connection_id).await;

        // 2. Room から削除（空になれば破棄）
        let departure = self.repository.leave(connection_id).await?;

        // 3. 残りのメンバーに通知
        announce_departure(self.message_pusher.as_ref(), connection_id, &departure).await;

        Some(departure)
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
    async fn test_leave_notifies_remaining_members() {
        // テスト項目: 退出時、残りのメンバーに user-left が届き Room は残る
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = LeaveRoomUseCase::new(repository.clone(), message_pusher.clone());
        let (alice, _alice_rx) = connect(&message_pusher).await;
        let (bob, mut bob_rx) = connect(&message_pusher).await;
        repository.join(room_id("r1"), alice, username("alice")).await;
        repository.join(room_id("r1"), bob, username("bob")).await;

        // when (操作):
        let departure = usecase.execute(&alice).await.unwrap();

        // then (期待する結果):
        assert!(!departure.room_closed);
        assert_eq!(
            drain(&mut bob_rx),
            vec![json!({"type": "user-left", "username": "alice", "users": ["bob"]})]
        );
        assert!(repository.get_room(&room_id("r1")).await.is_some());
        assert_eq!(message_pusher.client_count().await, 1);
    }

    #[tokio::test]
    async fn test_last_leave_destroys_room() {
        // テスト項目: 最後のメンバーが退出すると Room が破棄される
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = LeaveRoomUseCase::new(repository.clone(), message_pusher.clone());
        let (alice, mut alice_rx) = connect(&message_pusher).await;
        repository.join(room_id("r1"), alice, username("alice")).await;

        // when (操作):
        let departure = usecase.execute(&alice).await.unwrap();

        // then (期待する結果):
        assert!(departure.room_closed);
        assert!(drain(&mut alice_rx).is_empty());
        assert!(repository.get_room(&room_id("r1")).await.is_none());
    }

    #[tokio::test]
    async fn test_leave_without_room_is_noop() {
        // テスト項目: どの Room にも属していない接続の切断は何もしない
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = LeaveRoomUseCase::new(repository.clone(), message_pusher.clone());
        let (lurker, _rx) = connect(&message_pusher).await;

        // when (操作):
        let departure = usecase.execute(&lurker).await;

        // then (期待する結果):
        assert_eq!(departure, None);
        assert_eq!(message_pusher.client_count().await, 0);
    }
}
