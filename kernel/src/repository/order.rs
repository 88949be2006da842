use crate::model::{
    id::UserId,
    order::{
        event::{CreateOrder, DecideOrder},
        Order,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, event: CreateOrder) -> AppResult<Order>;
    async fn decide(&self, event: DecideOrder) -> AppResult<Order>;
    async fn find_all(&self, limit: i64) -> AppResult<Vec<Order>>;
    async fn find_by_student(&self, student_id: UserId, limit: i64) -> AppResult<Vec<Order>>;
}
