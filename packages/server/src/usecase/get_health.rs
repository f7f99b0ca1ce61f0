//! UseCase: ヘルスチェック（稼働中の Room 数と接続ユーザー数）

use std::sync::Arc;

use crate::domain::{RegistryStats, RoomRepository};

pub struct GetHealthUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetHealthUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> RegistryStats {
        self.repository.stats().await
    }
}
