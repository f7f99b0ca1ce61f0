//! Session Registry
//!
//! 全ての Room と接続の所在を保持する、I/O を持たない純粋なデータ構造です。
//! Room のライフサイクルは次の状態遷移のみで表現されます。
//!
//! ```text
//! {absent} --join--> {active} --(last member leaves)--> {absent}
//! ```

use std::collections::HashMap;

use watchparty_shared::time::Clock;

use super::{
    entity::{ChatMessage, MembershipChange, PlaybackCommand, Room, RoomSnapshot},
    value_object::{ConnectionId, RoomId, Timestamp, Username, VideoUrl},
};

/// Result of a successful join.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    pub room_id: RoomId,
    pub username: Username,
    /// Full room state for the joining connection.
    pub snapshot: RoomSnapshot,
    /// Every member of the room after the join, joiner included.
    pub members: Vec<ConnectionId>,
    pub change: MembershipChange,
    pub room_created: bool,
    /// Set when the connection moved here from another room.
    pub previous: Option<Departure>,
}

/// Result of removing a connection from its room.
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    pub room_id: RoomId,
    pub username: Username,
    /// Display names still in the room.
    pub users: Vec<Username>,
    /// Connections still in the room.
    pub remaining: Vec<ConnectionId>,
    pub room_closed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryStats {
    pub active_rooms: usize,
    pub total_users: usize,
}

/// Owner of all room, membership, playback and chat state.
pub struct SessionRegistry {
    rooms: HashMap<RoomId, Room>,
    /// Reverse index: which room each connection is in.
    locations: HashMap<ConnectionId, RoomId>,
    clock: Box<dyn Clock>,
}

impl SessionRegistry {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            rooms: HashMap::new(),
            locations: HashMap::new(),
            clock,
        }
    }

    /// Add `connection_id` to `room_id`, creating the room on first join.
    ///
    /// A connection is in at most one room: joining another room leaves the
    /// current one first.
    pub fn join(
        &mut self,
        room_id: RoomId,
        connection_id: ConnectionId,
        username: Username,
    ) -> JoinOutcome {
        let moving = self
            .locations
            .get(&connection_id)
            .is_some_and(|current| current != &room_id);
        let previous = if moving {
            self.leave(&connection_id)
        } else {
            None
        };

        let room_created = !self.rooms.contains_key(&room_id);
        let created_at = Timestamp::new(self.clock.now_millis());
        let room = self
            .rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id.clone(), created_at));
        if room_created {
            tracing::info!("Room '{}' created", room_id);
        }

        let change = room.membership.insert(connection_id, username.clone());
        self.locations.insert(connection_id, room_id.clone());

        JoinOutcome {
            snapshot: room.snapshot(),
            members: room.membership.connection_ids(),
            room_id,
            username,
            change,
            room_created,
            previous,
        }
    }

    /// Remove `connection_id` from whichever room it is in. Deletes the room
    /// when it becomes empty; this is the only way a room is ever removed.
    pub fn leave(&mut self, connection_id: &ConnectionId) -> Option<Departure> {
        let room_id = self.locations.remove(connection_id)?;
        let room = self.rooms.get_mut(&room_id)?;
        let username = room.membership.remove(connection_id)?;

        let users = room.membership.users();
        let remaining = room.membership.connection_ids();
        let room_closed = room.membership.is_empty();
        if room_closed {
            self.rooms.remove(&room_id);
            tracing::info!("Room '{}' is empty and has been cleaned up", room_id);
        }

        Some(Departure {
            room_id,
            username,
            users,
            remaining,
            room_closed,
        })
    }

    pub fn room_of(&self, connection_id: &ConnectionId) -> Option<&RoomId> {
        self.locations.get(connection_id)
    }

    pub fn room(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Load a video. Returns the room's members, or `None` if the room does not exist.
    pub fn load_video(
        &mut self,
        room_id: &RoomId,
        video_url: VideoUrl,
    ) -> Option<Vec<ConnectionId>> {
        let room = self.rooms.get_mut(room_id)?;
        room.playback.load(video_url);
        Some(room.membership.connection_ids())
    }

    /// Apply play/pause/seek. Returns the room's members, or `None` if the room does not exist.
    pub fn apply_playback(
        &mut self,
        room_id: &RoomId,
        command: PlaybackCommand,
    ) -> Option<Vec<ConnectionId>> {
        let room = self.rooms.get_mut(room_id)?;
        room.playback.apply(command);
        Some(room.membership.connection_ids())
    }

    /// Append a chat message. Returns the room's members, or `None` if the room does not exist.
    pub fn append_message(
        &mut self,
        room_id: &RoomId,
        message: ChatMessage,
    ) -> Option<Vec<ConnectionId>> {
        let room = self.rooms.get_mut(room_id)?;
        room.messages.append(message);
        Some(room.membership.connection_ids())
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            active_rooms: self.rooms.len(),
            total_users: self.rooms.values().map(|room| room.membership.len()).sum(),
        }
    }
}
