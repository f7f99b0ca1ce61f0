//! 配信対象の解決と送信

use crate::domain::{ConnectionId, Departure, MessagePusher, ServerEvent, Username};

/// Resolve the event's audience against the room members and enqueue it.
///
/// Returns the connections the event was handed to. Delivery failures are
/// logged, never propagated: fan-out is fire-and-forget.
pub(crate) async fn fan_out(
    message_pusher: &dyn MessagePusher,
    sender: &ConnectionId,
    members: Vec<ConnectionId>,
    event: ServerEvent,
) -> Vec<ConnectionId> {
    let targets = event.audience().resolve(sender, members);
    if targets.is_empty() {
        return targets;
    }

    if let Err(e) = message_pusher.broadcast(targets.clone(), &event).await {
        tracing::warn!("Failed to fan out event: {}", e);
    }
    targets
}

/// Tell the rest of a room that a member left.
pub(crate) async fn announce_departure(
    message_pusher: &dyn MessagePusher,
    connection_id: &ConnectionId,
    departure: &Departure,
) -> Vec<ConnectionId> {
    let event = ServerEvent::UserLeft {
        username: departure.username.clone(),
        users: departure.users.clone(),
    };
    let targets = fan_out(
        message_pusher,
        connection_id,
        departure.remaining.clone(),
        event,
    )
    .await;

    tracing::info!(
        "'{}' left room '{}'. Remaining users: {:?}",
        departure.username,
        departure.room_id,
        departure
            .users
            .iter()
            .map(Username::as_str)
            .collect::<Vec<_>>()
    );
    targets
}
