//! UseCase 層
//!
//! 受信イベントごとのユースケースと、それらを束ねる EventRouter。

pub mod control_playback;
pub mod error;
pub mod get_health;
pub mod get_rooms;
pub mod join_room;
pub mod leave_room;
pub mod load_video;
pub mod router;
pub mod send_message;

pub(crate) mod fan_out;

#[cfg(test)]
mod test_support;

pub use control_playback::ControlPlaybackUseCase;
pub use error::JoinRoomError;
pub use get_health::GetHealthUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use load_video::LoadVideoUseCase;
pub use router::EventRouter;
pub use send_message::SendMessageUseCase;
