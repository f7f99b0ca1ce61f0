//! Domain layer: the room session model and the seams it needs from the outside.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::{
    ChatMessage, Member, Membership, MembershipChange, MessageLog, PlaybackCommand,
    PlaybackState, Room, RoomSnapshot,
};
pub use error::{MessagePushError, ValidationError};
pub use event::{Audience, ClientEvent, ServerEvent};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use registry::{Departure, JoinOutcome, RegistryStats, SessionRegistry};
pub use repository::RoomRepository;
pub use value_object::{
    ClientTimestamp, ConnectionId, MAX_MESSAGE_LENGTH, MessageText, PlaybackPosition, RoomId,
    Timestamp, Username, VideoUrl,
};
