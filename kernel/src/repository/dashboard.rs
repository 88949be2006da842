use crate::model::dashboard::{DashboardStats, StockLevel};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn stats(&self, today: NaiveDate) -> AppResult<DashboardStats>;
    async fn top_stock(&self, today: NaiveDate, limit: i64) -> AppResult<Vec<StockLevel>>;
}
