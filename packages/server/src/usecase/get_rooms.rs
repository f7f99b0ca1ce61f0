//! UseCase: Room 一覧の取得（監視用）

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Room ID 順の一覧
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.get_rooms().await
    }
}
