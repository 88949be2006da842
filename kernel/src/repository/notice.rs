use crate::model::notice::{Notice, NoticeAudience};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait NoticeRepository: Send + Sync {
    // newest first
    async fn find_visible(&self, audience: &NoticeAudience, limit: i64) -> AppResult<Vec<Notice>>;
}
