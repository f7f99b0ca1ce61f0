//! WebSocket event DTOs.
//!
//! Every frame is a JSON object whose `type` field names the event; payload
//! fields sit next to it in camelCase.

use serde::{Deserialize, Serialize};

use crate::domain::ClientTimestamp;

/// Client → server events
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundMessage {
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        #[serde(default)]
        room_id: String,
        #[serde(default)]
        username: String,
    },
    #[serde(rename_all = "camelCase")]
    LoadVideo { room_id: String, video_url: String },
    #[serde(rename_all = "camelCase")]
    PlayVideo { room_id: String, timestamp: f64 },
    #[serde(rename_all = "camelCase")]
    PauseVideo { room_id: String, timestamp: f64 },
    #[serde(rename_all = "camelCase")]
    SeekVideo { room_id: String, timestamp: f64 },
    #[serde(rename_all = "camelCase")]
    SendMessage {
        room_id: String,
        username: String,
        message: String,
        timestamp: ClientTimestamp,
    },
}

/// Server → client events
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundMessage {
    #[serde(rename_all = "camelCase")]
    RoomState {
        video_url: String,
        is_playing: bool,
        current_time: f64,
        messages: Vec<ChatMessageDto>,
        users: Vec<String>,
    },
    UserJoined {
        username: String,
        users: Vec<String>,
    },
    UserLeft {
        username: String,
        users: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    VideoLoaded { video_url: String },
    VideoPlay { timestamp: f64 },
    VideoPause { timestamp: f64 },
    VideoSeek { timestamp: f64 },
    ReceiveMessage(ChatMessageDto),
    Error { message: String },
}

/// Chat entry as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessageDto {
    pub username: String,
    pub message: String,
    pub timestamp: ClientTimestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_join_room() {
        // テスト項目: join-room イベントが camelCase のフィールドで解析される
        // given (前提条件):
        let text = r#"{"type":"join-room","roomId":"r1","username":"alice"}"#;

        // when (操作):
        let message: InboundMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            message,
            InboundMessage::JoinRoom {
                room_id: "r1".to_string(),
                username: "alice".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_join_room_with_missing_fields() {
        // テスト項目: join-room のフィールド欠落は空文字列として解析される（検証は変換時）
        // given (前提条件):
        let text = r#"{"type":"join-room"}"#;

        // when (操作):
        let message: InboundMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            message,
            InboundMessage::JoinRoom {
                room_id: String::new(),
                username: String::new(),
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_type_and_missing_timestamp() {
        // テスト項目: 未知のイベントや必須フィールド欠落は解析エラーになる
        // given (前提条件):
        let unknown = r#"{"type":"rewind-video","roomId":"r1"}"#;
        let missing = r#"{"type":"play-video","roomId":"r1"}"#;

        // when (操作) / then (期待する結果):
        assert!(serde_json::from_str::<InboundMessage>(unknown).is_err());
        assert!(serde_json::from_str::<InboundMessage>(missing).is_err());
    }

    #[test]
    fn test_serialize_outbound_events() {
        // テスト項目: 送信イベントが type タグ付きの JSON にシリアライズされる
        // given (前提条件):
        let loaded = OutboundMessage::VideoLoaded {
            video_url: "https://youtu.be/abc123".to_string(),
        };
        let play = OutboundMessage::VideoPlay { timestamp: 12.5 };
        let chat = OutboundMessage::ReceiveMessage(ChatMessageDto {
            username: "alice".to_string(),
            message: "hi".to_string(),
            timestamp: ClientTimestamp::Text("12:00".to_string()),
        });

        // when (操作):
        let loaded_json = serde_json::to_value(&loaded).unwrap();
        let play_json = serde_json::to_value(&play).unwrap();
        let chat_json = serde_json::to_value(&chat).unwrap();

        // then (期待する結果):
        assert_eq!(
            loaded_json,
            json!({"type": "video-loaded", "videoUrl": "https://youtu.be/abc123"})
        );
        assert_eq!(play_json, json!({"type": "video-play", "timestamp": 12.5}));
        assert_eq!(
            chat_json,
            json!({"type": "receive-message", "username": "alice", "message": "hi", "timestamp": "12:00"})
        );
    }

    #[test]
    fn test_serialize_room_state() {
        // テスト項目: room-state が再生状態・メッセージ・ユーザー一覧を含む
        // given (前提条件):
        let state = OutboundMessage::RoomState {
            video_url: String::new(),
            is_playing: false,
            current_time: 0.0,
            messages: vec![],
            users: vec!["alice".to_string()],
        };

        // when (操作):
        let json = serde_json::to_value(&state).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "room-state");
        assert_eq!(json["videoUrl"], "");
        assert_eq!(json["isPlaying"], false);
        assert_eq!(json["currentTime"].as_f64(), Some(0.0));
        assert_eq!(json["messages"], json!([]));
        assert_eq!(json["users"], json!(["alice"]));
    }
}
