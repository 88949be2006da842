use crate::model::complaint::{
    event::{AnswerComplaint, CreateComplaint},
    Complaint, ComplaintScope,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    async fn create(&self, event: CreateComplaint) -> AppResult<Complaint>;
    async fn answer(&self, event: AnswerComplaint) -> AppResult<Complaint>;
    async fn find(&self, scope: ComplaintScope, limit: i64) -> AppResult<Vec<Complaint>>;
}
