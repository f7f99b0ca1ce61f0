//! HTTP API response DTOs.

use serde::Serialize;

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDto {
    pub status: String,
    pub active_rooms: usize,
    pub total_users: usize,
}

/// One entry of `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub users: Vec<String>,
    pub video_url: String,
    pub is_playing: bool,
    pub current_time: f64,
    pub message_count: usize,
    pub created_at: String,
}
