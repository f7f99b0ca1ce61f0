//! Conversion logic between DTOs and domain types.

use watchparty_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    ChatMessage, ClientEvent, MessageText, PlaybackCommand, PlaybackPosition, RegistryStats,
    Room, RoomId, ServerEvent, Username, ValidationError, VideoUrl,
};
use crate::infrastructure::dto::{
    http::{HealthDto, RoomSummaryDto},
    websocket::{ChatMessageDto, InboundMessage, OutboundMessage},
};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<InboundMessage> for ClientEvent {
    type Error = ValidationError;

    fn try_from(dto: InboundMessage) -> Result<Self, Self::Error> {
        let event = match dto {
            InboundMessage::JoinRoom { room_id, username } => Self::JoinRoom {
                room_id: RoomId::new(room_id)?,
                username: Username::new(username)?,
            },
            InboundMessage::LoadVideo { room_id, video_url } => Self::LoadVideo {
                room_id: RoomId::new(room_id)?,
                video_url: VideoUrl::parse(video_url)?,
            },
            InboundMessage::PlayVideo { room_id, timestamp } => Self::Playback {
                room_id: RoomId::new(room_id)?,
                command: PlaybackCommand::Play(PlaybackPosition::new(timestamp)?),
            },
            InboundMessage::PauseVideo { room_id, timestamp } => Self::Playback {
                room_id: RoomId::new(room_id)?,
                command: PlaybackCommand::Pause(PlaybackPosition::new(timestamp)?),
            },
            InboundMessage::SeekVideo { room_id, timestamp } => Self::Playback {
                room_id: RoomId::new(room_id)?,
                command: PlaybackCommand::Seek(PlaybackPosition::new(timestamp)?),
            },
            InboundMessage::SendMessage {
                room_id,
                username,
                message,
                timestamp,
            } => {
                // Content is checked first. Only an over-long message is reported;
                // any other defect drops the event silently.
                let message = MessageText::new(message)?;
                Self::SendMessage {
                    room_id: RoomId::new(room_id)
                        .map_err(|_| ValidationError::InvalidChatMessage)?,
                    username: Username::new(username)
                        .map_err(|_| ValidationError::InvalidChatMessage)?,
                    message,
                    timestamp,
                }
            }
        };
        Ok(event)
    }
}

/// Parse a raw text frame into a validated event.
///
/// A `send-message` frame that cannot be deserialized (missing or null
/// `message`, missing `timestamp`, ...) is a silent drop, not a malformed event.
pub fn parse_client_event(text: &str) -> Result<ClientEvent, ValidationError> {
    let dto = match serde_json::from_str::<InboundMessage>(text) {
        Ok(dto) => dto,
        Err(e) if is_send_message_frame(text) => {
            tracing::debug!("Dropping unreadable send-message frame: {}", e);
            return Err(ValidationError::InvalidChatMessage);
        }
        Err(e) => {
            tracing::debug!("Failed to parse frame: {}", e);
            return Err(ValidationError::MalformedEvent);
        }
    };
    ClientEvent::try_from(dto)
}

fn is_send_message_frame(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text)
        .is_ok_and(|value| value["type"] == "send-message")
}

// ========================================
// Domain → DTO
// ========================================

impl From<ChatMessage> for ChatMessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            username: model.username.into_string(),
            message: model.message.into_string(),
            timestamp: model.timestamp,
        }
    }
}

fn usernames(users: Vec<Username>) -> Vec<String> {
    users.into_iter().map(Username::into_string).collect()
}

impl From<ServerEvent> for OutboundMessage {
    fn from(event: ServerEvent) -> Self {
        match event {
            ServerEvent::RoomState(snapshot) => Self::RoomState {
                video_url: snapshot
                    .playback
                    .video_url
                    .map(VideoUrl::into_string)
                    .unwrap_or_default(),
                is_playing: snapshot.playback.is_playing,
                current_time: snapshot.playback.current_time.seconds(),
                messages: snapshot.messages.into_iter().map(Into::into).collect(),
                users: usernames(snapshot.users),
            },
            ServerEvent::UserJoined { username, users } => Self::UserJoined {
                username: username.into_string(),
                users: usernames(users),
            },
            ServerEvent::UserLeft { username, users } => Self::UserLeft {
                username: username.into_string(),
                users: usernames(users),
            },
            ServerEvent::VideoLoaded { video_url } => Self::VideoLoaded {
                video_url: video_url.into_string(),
            },
            ServerEvent::VideoPlay { timestamp } => Self::VideoPlay {
                timestamp: timestamp.seconds(),
            },
            ServerEvent::VideoPause { timestamp } => Self::VideoPause {
                timestamp: timestamp.seconds(),
            },
            ServerEvent::VideoSeek { timestamp } => Self::VideoSeek {
                timestamp: timestamp.seconds(),
            },
            ServerEvent::ReceiveMessage(message) => Self::ReceiveMessage(message.into()),
            ServerEvent::Error { message } => Self::Error { message },
        }
    }
}

impl From<&ServerEvent> for OutboundMessage {
    fn from(event: &ServerEvent) -> Self {
        event.clone().into()
    }
}

impl From<RegistryStats> for HealthDto {
    fn from(stats: RegistryStats) -> Self {
        Self {
            status: "ok".to_string(),
            active_rooms: stats.active_rooms,
            total_users: stats.total_users,
        }
    }
}

impl From<Room> for RoomSummaryDto {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.into_string(),
            users: usernames(room.membership.users()),
            video_url: room
                .playback
                .video_url
                .map(VideoUrl::into_string)
                .unwrap_or_default(),
            is_playing: room.playback.is_playing,
            current_time: room.playback.current_time.seconds(),
            message_count: room.messages.len(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}
