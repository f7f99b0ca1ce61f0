//! Utilities shared by the watch party binaries.

pub mod logger;
pub mod time;
