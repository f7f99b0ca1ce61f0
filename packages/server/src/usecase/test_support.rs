//! UseCase テスト用の共通ヘルパー

use std::sync::Arc;

use tokio::sync::mpsc;
use watchparty_shared::time::FixedClock;

use crate::{
    domain::{ConnectionId, MessagePusher, RoomId, SessionRegistry, Username},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
};

pub(crate) fn create_test_repository() -> Arc<InMemoryRoomRepository> {
    Arc::new(InMemoryRoomRepository::new(SessionRegistry::new(Box::new(
        FixedClock::new(1_000),
    ))))
}

pub(crate) fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::new())
}

/// Register a new connection and return its id with the receiving end of its channel.
pub(crate) async fn connect(
    message_pusher: &WebSocketMessagePusher,
) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    message_pusher.register_client(connection_id, tx).await;
    (connection_id, rx)
}

/// Everything queued for a connection so far, parsed as JSON.
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<serde_json::Value> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(serde_json::from_str(&frame).expect("frame should be JSON"));
    }
    frames
}

pub(crate) fn room_id(value: &str) -> RoomId {
    RoomId::new(value.to_string()).unwrap()
}

pub(crate) fn username(value: &str) -> Username {
    Username::new(value.to_string()).unwrap()
}
