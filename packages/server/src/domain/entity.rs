//! Entity 定義
//!
//! Room と、その構成要素である Membership / PlaybackState / MessageLog。

use super::value_object::{
    ClientTimestamp, ConnectionId, MessageText, PlaybackPosition, RoomId, Timestamp, Username,
    VideoUrl,
};

/// Transition requested by a play, pause or seek event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackCommand {
    Play(PlaybackPosition),
    Pause(PlaybackPosition),
    Seek(PlaybackPosition),
}

impl PlaybackCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Play(_) => "play",
            Self::Pause(_) => "pause",
            Self::Seek(_) => "seek",
        }
    }

    pub fn position(&self) -> PlaybackPosition {
        match self {
            Self::Play(position) | Self::Pause(position) | Self::Seek(position) => *position,
        }
    }
}

/// Authoritative playback state of a room.
///
/// The server never advances `current_time` on its own; it is always the last
/// position a client reported.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub video_url: Option<VideoUrl>,
    pub is_playing: bool,
    pub current_time: PlaybackPosition,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            video_url: None,
            is_playing: false,
            current_time: PlaybackPosition::ZERO,
        }
    }
}

impl PlaybackState {
    /// Replace the video. A fresh load is always paused at the start.
    pub fn load(&mut self, video_url: VideoUrl) {
        self.video_url = Some(video_url);
        self.is_playing = false;
        self.current_time = PlaybackPosition::ZERO;
    }

    /// Apply a control event. Redundant transitions (play while playing) are applied as-is.
    pub fn apply(&mut self, command: PlaybackCommand) {
        match command {
            PlaybackCommand::Play(position) => {
                self.is_playing = true;
                self.current_time = position;
            }
            PlaybackCommand::Pause(position) => {
                self.is_playing = false;
                self.current_time = position;
            }
            PlaybackCommand::Seek(position) => {
                self.current_time = position;
            }
        }
    }
}

/// Chat entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub username: Username,
    pub message: MessageText,
    pub timestamp: ClientTimestamp,
}

impl ChatMessage {
    pub fn new(username: Username, message: MessageText, timestamp: ClientTimestamp) -> Self {
        Self {
            username,
            message,
            timestamp,
        }
    }
}

/// Append-only chat history in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageLog {
    entries: Vec<ChatMessage>,
}

impl MessageLog {
    pub fn append(&mut self, message: ChatMessage) {
        self.entries.push(message);
    }

    pub fn entries(&self) -> &[ChatMessage] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub connection_id: ConnectionId,
    pub username: Username,
}

/// What happened when a connection was added to a membership.
#[derive(Debug, Clone, PartialEq)]
pub enum MembershipChange {
    Joined,
    Renamed { previous: Username },
}

/// Connection to display name mapping, kept in join order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Membership {
    members: Vec<Member>,
}

impl Membership {
    /// Register `connection_id` under `username`. A second join by the same
    /// connection is a rename and keeps the member's position.
    pub fn insert(&mut self, connection_id: ConnectionId, username: Username) -> MembershipChange {
        match self
            .members
            .iter_mut()
            .find(|member| member.connection_id == connection_id)
        {
            Some(member) => {
                let previous = std::mem::replace(&mut member.username, username);
                MembershipChange::Renamed { previous }
            }
            None => {
                self.members.push(Member {
                    connection_id,
                    username,
                });
                MembershipChange::Joined
            }
        }
    }

    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<Username> {
        let index = self
            .members
            .iter()
            .position(|member| &member.connection_id == connection_id)?;
        Some(self.members.remove(index).username)
    }

    /// Display names in join order. Duplicates are kept.
    pub fn users(&self) -> Vec<Username> {
        self.members
            .iter()
            .map(|member| member.username.clone())
            .collect()
    }

    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.members
            .iter()
            .map(|member| member.connection_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Full state of a room as delivered to a joining client.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub playback: PlaybackState,
    pub messages: Vec<ChatMessage>,
    pub users: Vec<Username>,
}

/// A room exists only while it has at least one member.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub created_at: Timestamp,
    pub playback: PlaybackState,
    pub messages: MessageLog,
    pub membership: Membership,
}

impl Room {
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            created_at,
            playback: PlaybackState::default(),
            messages: MessageLog::default(),
            membership: Membership::default(),
        }
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            playback: self.playback.clone(),
            messages: self.messages.entries().to_vec(),
            users: self.membership.users(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(seconds: f64) -> PlaybackPosition {
        PlaybackPosition::new(seconds).unwrap()
    }

    fn username(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    fn video(link: &str) -> VideoUrl {
        VideoUrl::parse(link.to_string()).unwrap()
    }

    #[test]
    fn test_load_resets_playhead_and_pauses() {
        // テスト項目: 動画のロードは再生状態に関わらず停止・0 秒にリセットする
        // given (前提条件):
        let mut state = PlaybackState::default();
        state.load(video("https://youtu.be/first"));
        state.apply(PlaybackCommand::Play(position(93.0)));

        // when (操作):
        state.load(video("https://youtu.be/second"));

        // then (期待する結果):
        assert_eq!(state.video_url, Some(video("https://youtu.be/second")));
        assert!(!state.is_playing);
        assert_eq!(state.current_time, PlaybackPosition::ZERO);
    }

    #[test]
    fn test_play_is_idempotent() {
        // テスト項目: 再生中に再度 play しても最新の位置で再生状態が維持される
        // given (前提条件):
        let mut state = PlaybackState::default();

        // when (操作):
        state.apply(PlaybackCommand::Play(position(5.0)));
        state.apply(PlaybackCommand::Play(position(7.5)));

        // then (期待する結果):
        assert!(state.is_playing);
        assert_eq!(state.current_time, position(7.5));
    }

    #[test]
    fn test_pause_and_seek_transitions() {
        // テスト項目: pause は停止して位置を更新し、seek は再生状態を変えずに位置のみ更新する
        // given (前提条件):
        let mut state = PlaybackState::default();
        state.apply(PlaybackCommand::Play(position(1.0)));

        // when (操作):
        state.apply(PlaybackCommand::Seek(position(30.0)));
        let after_seek = state.clone();
        state.apply(PlaybackCommand::Pause(position(31.0)));

        // then (期待する結果):
        assert!(after_seek.is_playing);
        assert_eq!(after_seek.current_time, position(30.0));
        assert!(!state.is_playing);
        assert_eq!(state.current_time, position(31.0));
    }

    #[test]
    fn test_membership_rename_keeps_position() {
        // テスト項目: 同じ接続の再 join はリネーム扱いで、並び順が維持される
        // given (前提条件):
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        let mut membership = Membership::default();
        membership.insert(alice, username("alice"));
        membership.insert(bob, username("bob"));

        // when (操作):
        let change = membership.insert(alice, username("alicia"));

        // then (期待する結果):
        assert_eq!(
            change,
            MembershipChange::Renamed {
                previous: username("alice")
            }
        );
        assert_eq!(membership.users(), vec![username("alicia"), username("bob")]);
        assert_eq!(membership.len(), 2);
    }

    #[test]
    fn test_membership_allows_duplicate_names() {
        // テスト項目: 表示名の重複は許容され、接続ごとに別メンバーとして扱われる
        // given (前提条件):
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();
        let mut membership = Membership::default();

        // when (操作):
        membership.insert(first, username("sam"));
        membership.insert(second, username("sam"));
        let removed = membership.remove(&first);

        // then (期待する結果):
        assert_eq!(removed, Some(username("sam")));
        assert_eq!(membership.users(), vec![username("sam")]);
        assert_eq!(membership.connection_ids(), vec![second]);
    }

    #[test]
    fn test_membership_remove_unknown_connection() {
        // テスト項目: 存在しない接続の削除は None を返す
        // given (前提条件):
        let mut membership = Membership::default();

        // when (操作):
        let removed = membership.remove(&ConnectionId::generate());

        // then (期待する結果):
        assert_eq!(removed, None);
        assert!(membership.is_empty());
    }

    #[test]
    fn test_room_snapshot_reflects_state() {
        // テスト項目: スナップショットに再生状態・メッセージ・ユーザー一覧が含まれる
        // given (前提条件):
        let mut room = Room::new(RoomId::new("r1".to_string()).unwrap(), Timestamp::new(0));
        let connection_id = ConnectionId::generate();
        room.membership.insert(connection_id, username("alice"));
        room.playback.load(video("https://youtu.be/abc123"));
        room.messages.append(ChatMessage::new(
            username("alice"),
            MessageText::new("hi".to_string()).unwrap(),
            ClientTimestamp::Text("12:00".to_string()),
        ));

        // when (操作):
        let snapshot = room.snapshot();

        // then (期待する結果):
        assert_eq!(snapshot.users, vec![username("alice")]);
        assert_eq!(snapshot.messages.len(), 1);
        assert_eq!(snapshot.messages[0].message.as_str(), "hi");
        assert_eq!(snapshot.playback.video_url, Some(video("https://youtu.be/abc123")));
    }
}
