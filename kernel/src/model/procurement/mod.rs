use crate::model::id::{ProcurementId, UserId};
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcurementEntry {
    pub id: ProcurementId,
    pub name: String,
    pub category: String,
    pub count: i32,
    pub price: i64,
    pub supplier: String,
    pub staff_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}
