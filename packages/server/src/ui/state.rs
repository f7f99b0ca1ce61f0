//! Server state shared by all handlers.

use std::sync::Arc;

use crate::usecase::{EventRouter, GetHealthUseCase, GetRoomsUseCase};

/// Shared application state
pub struct AppState {
    /// EventRouter（WebSocket イベントのディスパッチ）
    pub event_router: Arc<EventRouter>,
    /// GetHealthUseCase（ヘルスチェック）
    pub get_health_usecase: Arc<GetHealthUseCase>,
    /// GetRoomsUseCase（Room 一覧取得）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
}
