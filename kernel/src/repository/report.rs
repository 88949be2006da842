use crate::model::{
    id::ReportId,
    report::{CreateReport, Report},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn create(&self, event: CreateReport) -> AppResult<Report>;
    async fn find_all(&self, limit: i64) -> AppResult<Vec<Report>>;
    async fn find_by_id(&self, report_id: ReportId) -> AppResult<Option<Report>>;
    async fn read_contents(&self, report: &Report) -> AppResult<Vec<u8>>;
}

/// Where rendered report documents live.
#[async_trait]
pub trait ReportStorage: Send + Sync {
    async fn save(&self, filename: &str, contents: &str) -> AppResult<()>;
    async fn load(&self, filename: &str) -> AppResult<Vec<u8>>;
    async fn remove(&self, filename: &str) -> AppResult<()>;
}
