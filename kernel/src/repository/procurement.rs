use crate::model::procurement::{event::CreateProcurement, ProcurementEntry};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ProcurementRepository: Send + Sync {
    async fn create(&self, event: CreateProcurement) -> AppResult<ProcurementEntry>;
    async fn find_recent(&self, limit: i64) -> AppResult<Vec<ProcurementEntry>>;
}
