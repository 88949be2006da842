use kernel::model::{
    id::{ProcurementId, UserId},
    procurement::ProcurementEntry,
};
use sqlx::{
    types::chrono::{DateTime, Utc},
    FromRow,
};

#[derive(FromRow)]
pub struct ProcurementRow {
    pub procurement_id: ProcurementId,
    pub name: String,
    pub category: String,
    pub count: i32,
    pub price: i64,
    pub supplier: String,
    pub staff_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl From<ProcurementRow> for ProcurementEntry {
    fn from(value: ProcurementRow) -> Self {
        ProcurementEntry {
            id: value.procurement_id,
            name: value.name,
            category: value.category,
            count: value.count,
            price: value.price,
            supplier: value.supplier,
            staff_id: value.staff_id,
            created_at: value.created_at,
        }
    }
}
