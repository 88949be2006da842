use crate::model::{
    id::MenuItemId,
    menu::{event::PublishMenuItem, MenuItem, StockLine},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Publishes the default menu for `day` unless something is already
    /// on it. Returns whether the default set was inserted.
    async fn seed_day_if_empty(&self, day: NaiveDate) -> AppResult<bool>;
    async fn publish(&self, event: PublishMenuItem) -> AppResult<MenuItem>;
    async fn find_by_date(&self, day: NaiveDate) -> AppResult<Vec<MenuItem>>;
    async fn find_history(&self, limit: i64) -> AppResult<Vec<MenuItem>>;
    async fn find_by_id(&self, menu_item_id: MenuItemId) -> AppResult<Option<MenuItem>>;
    async fn availability(&self, day: NaiveDate) -> AppResult<Vec<StockLine>>;
}
