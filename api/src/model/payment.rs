use super::form::{lenient_i64, lenient_id, text};
use chrono::{DateTime, Utc};
use kernel::model::{
    accounting::{event::TopUp, LedgerEntry, TransactionKind},
    id::{TransactionId, UserId},
};
use serde::{Deserialize, Serialize};

/// `?student_id=` on payment and subscription pages.
#[derive(Deserialize, Default)]
pub struct StudentQuery {
    #[serde(default, deserialize_with = "lenient_id")]
    pub student_id: Option<UserId>,
}

#[derive(Deserialize)]
pub struct TopUpRequest {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub amount: Option<i64>,
    #[serde(default, deserialize_with = "text")]
    pub method: Option<String>,
}

impl TopUpRequest {
    pub fn into_event(self, student_id: UserId) -> TopUp {
        TopUp::new(
            student_id,
            self.amount.unwrap_or(0),
            self.method.unwrap_or_else(|| "cash".into()),
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryResponse {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub amount: i64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<LedgerEntry> for LedgerEntryResponse {
    fn from(value: LedgerEntry) -> Self {
        Self {
            id: value.id,
            kind: value.kind,
            amount: value.amount,
            note: value.note,
            created_at: value.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsResponse {
    pub student_id: UserId,
    pub balance: i64,
    pub transactions: Vec<LedgerEntryResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
