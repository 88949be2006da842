use crate::model::{
    accounting::{
        event::{BuySubscription, ServeMeal, TopUp, WriteOffPortions},
        subscription::Subscription,
        LedgerEntry, Serve, WriteOff,
    },
    id::UserId,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

/// Every mutating operation is all-or-nothing: balance, portions, ledger,
/// serve/write-off record and notice commit together or not at all.
#[async_trait]
pub trait AccountingRepository: Send + Sync {
    async fn serve(&self, event: ServeMeal) -> AppResult<Serve>;
    async fn write_off(&self, event: WriteOffPortions) -> AppResult<WriteOff>;
    async fn top_up(&self, event: TopUp) -> AppResult<LedgerEntry>;
    async fn buy_subscription(&self, event: BuySubscription) -> AppResult<Subscription>;
    async fn find_active_subscription(
        &self,
        student_id: UserId,
        today: NaiveDate,
    ) -> AppResult<Option<Subscription>>;
    async fn find_ledger(&self, student_id: UserId, limit: i64) -> AppResult<Vec<LedgerEntry>>;
    async fn find_recent_serves(&self, limit: i64) -> AppResult<Vec<Serve>>;
    async fn find_recent_write_offs(&self, limit: i64) -> AppResult<Vec<WriteOff>>;
}
