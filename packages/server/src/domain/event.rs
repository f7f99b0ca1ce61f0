//! Closed sets of inbound and outbound events, and who receives each outbound event.

use super::{
    entity::{ChatMessage, PlaybackCommand, RoomSnapshot},
    value_object::{
        ClientTimestamp, ConnectionId, MessageText, PlaybackPosition, RoomId, Username, VideoUrl,
    },
};

/// A validated event sent by a client. `disconnect` is raised by the transport
/// and has no payload, so it is not part of this enum.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    JoinRoom {
        room_id: RoomId,
        username: Username,
    },
    LoadVideo {
        room_id: RoomId,
        video_url: VideoUrl,
    },
    Playback {
        room_id: RoomId,
        command: PlaybackCommand,
    },
    SendMessage {
        room_id: RoomId,
        username: Username,
        message: MessageText,
        timestamp: ClientTimestamp,
    },
}

/// An event delivered to one or more connections.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    RoomState(RoomSnapshot),
    UserJoined {
        username: Username,
        users: Vec<Username>,
    },
    UserLeft {
        username: Username,
        users: Vec<Username>,
    },
    VideoLoaded {
        video_url: VideoUrl,
    },
    VideoPlay {
        timestamp: PlaybackPosition,
    },
    VideoPause {
        timestamp: PlaybackPosition,
    },
    VideoSeek {
        timestamp: PlaybackPosition,
    },
    ReceiveMessage(ChatMessage),
    Error {
        message: String,
    },
}

impl ServerEvent {
    /// The control event echoed to the rest of the room for a playback command.
    pub fn from_playback(command: PlaybackCommand) -> Self {
        match command {
            PlaybackCommand::Play(timestamp) => Self::VideoPlay { timestamp },
            PlaybackCommand::Pause(timestamp) => Self::VideoPause { timestamp },
            PlaybackCommand::Seek(timestamp) => Self::VideoSeek { timestamp },
        }
    }

    /// Fan-out policy of each outbound event.
    ///
    /// Control events never go back to the connection that caused them, so a
    /// player does not re-apply its own action. Loads and chat do, so the
    /// sender sees the accepted value.
    pub fn audience(&self) -> Audience {
        match self {
            Self::RoomState(_) | Self::Error { .. } => Audience::Sender,
            Self::UserJoined { .. }
            | Self::VideoPlay { .. }
            | Self::VideoPause { .. }
            | Self::VideoSeek { .. } => Audience::RoomExceptSender,
            Self::UserLeft { .. } | Self::VideoLoaded { .. } | Self::ReceiveMessage(_) => {
                Audience::Room
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Sender,
    Room,
    RoomExceptSender,
}

impl Audience {
    /// Resolve the connections that receive an event.
    pub fn resolve(self, sender: &ConnectionId, members: Vec<ConnectionId>) -> Vec<ConnectionId> {
        match self {
            Self::Sender => vec![*sender],
            Self::Room => members,
            Self::RoomExceptSender => members.into_iter().filter(|id| id != sender).collect(),
        }
    }
}
