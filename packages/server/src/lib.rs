//! Watch-party session sync server.
//!
//! Rooms, their members, the shared playback state and the chat log live in
//! memory; every inbound WebSocket event is routed through a single dispatcher
//! that mutates state and fans the result out to the room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
