use super::form::{lenient_i32, lenient_i64, trimmed};
use chrono::{DateTime, Utc};
use kernel::model::{
    id::ProcurementId,
    procurement::{event::CreateProcurement, ProcurementEntry},
    user::User,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CreateProcurementRequest {
    #[serde(default, deserialize_with = "trimmed")]
    pub item_name: String,
    #[serde(default, deserialize_with = "trimmed")]
    pub item_category: String,
    #[serde(default, deserialize_with = "trimmed")]
    pub supplier: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub count: Option<i32>,
}

impl CreateProcurementRequest {
    pub fn into_event(self, staff: &User) -> CreateProcurement {
        CreateProcurement::new(
            self.item_name,
            self.item_category,
            self.count.unwrap_or(0),
            self.price.unwrap_or(0),
            self.supplier,
            staff.id,
            staff.name.clone(),
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcurementResponse {
    pub id: ProcurementId,
    pub name: String,
    pub category: String,
    pub count: i32,
    pub price: i64,
    pub supplier: String,
    pub created_at: DateTime<Utc>,
}

impl From<ProcurementEntry> for ProcurementResponse {
    fn from(value: ProcurementEntry) -> Self {
        Self {
            id: value.id,
            name: value.name,
            category: value.category,
            count: value.count,
            price: value.price,
            supplier: value.supplier,
            created_at: value.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcurementsResponse {
    pub items: Vec<ProcurementResponse>,
}

impl From<Vec<ProcurementEntry>> for ProcurementsResponse {
    fn from(value: Vec<ProcurementEntry>) -> Self {
        Self {
            items: value.into_iter().map(ProcurementResponse::from).collect(),
        }
    }
}
