//! Domain errors.

use thiserror::Error;

/// Input that violates the event contract.
///
/// The `Display` text is exactly what the sender receives on the `error` channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Room ID is required")]
    EmptyRoomId,

    #[error("Username is required")]
    EmptyUsername,

    #[error("Invalid Youtube URL")]
    InvalidVideoUrl,

    #[error("Invalid timestamp")]
    InvalidTimestamp,

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Message too long(max {max} characters)")]
    MessageTooLong { max: usize },

    /// A chat event with a missing or invalid field other than its length.
    #[error("Invalid chat message")]
    InvalidChatMessage,

    #[error("Malformed event")]
    MalformedEvent,
}

impl ValidationError {
    /// Whether the failure is reported back to the sender.
    ///
    /// Chat events are dropped silently unless the message is too long;
    /// everything else is reported.
    pub fn is_reported(&self) -> bool {
        !matches!(self, Self::EmptyMessage | Self::InvalidChatMessage)
    }
}

/// Errors raised while pushing events to connections.
#[derive(Debug, Error)]
pub enum MessagePushError {
    #[error("Connection '{0}' is not registered")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),

    #[error("Failed to serialize event: {0}")]
    SerializationFailed(String),
}
