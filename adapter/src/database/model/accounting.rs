use super::parse_column;
use kernel::model::{
    accounting::{subscription::Subscription, LedgerEntry, Serve, WriteOff},
    id::{MenuItemId, ServeId, SubscriptionId, TransactionId, UserId, WriteOffId},
};
use shared::error::AppError;
use sqlx::{
    types::chrono::{DateTime, NaiveDate, Utc},
    FromRow,
};

// Row locked while an accounting operation runs.
#[derive(FromRow)]
pub struct StudentAccountRow {
    pub name: String,
    pub login: String,
    pub role: String,
    pub balance: i64,
}

#[derive(FromRow)]
pub struct TransactionRow {
    pub transaction_id: TransactionId,
    pub student_id: UserId,
    pub kind: String,
    pub amount: i64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for LedgerEntry {
    type Error = AppError;

    fn try_from(value: TransactionRow) -> Result<Self, Self::Error> {
        Ok(LedgerEntry {
            id: value.transaction_id,
            student_id: value.student_id,
            kind: parse_column("transaction kind", &value.kind)?,
            amount: value.amount,
            note: value.note,
            created_at: value.created_at,
        })
    }
}

#[derive(FromRow)]
pub struct ServeRow {
    pub serve_id: ServeId,
    pub student_id: UserId,
    pub student_name: String,
    pub menu_item_id: MenuItemId,
    pub item_name: String,
    pub meal_type: String,
    pub count: i32,
    pub pay_type: String,
    pub amount: i64,
    pub comment: Option<String>,
    pub staff_id: Option<UserId>,
    pub served_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ServeRow> for Serve {
    type Error = AppError;

    fn try_from(value: ServeRow) -> Result<Self, Self::Error> {
        let ServeRow {
            serve_id,
            student_id,
            student_name,
            menu_item_id,
            item_name,
            meal_type,
            count,
            pay_type,
            amount,
            comment,
            staff_id,
            served_on,
            created_at,
        } = value;
        Ok(Serve {
            id: serve_id,
            student_id,
            student_name,
            menu_item_id,
            item_name,
            meal_type: parse_column("meal type", &meal_type)?,
            count,
            pay_type: parse_column("pay type", &pay_type)?,
            amount,
            comment,
            staff_id,
            served_on,
            created_at,
        })
    }
}

#[derive(FromRow)]
pub struct WriteOffRow {
    pub write_off_id: WriteOffId,
    pub menu_item_id: MenuItemId,
    pub item_name: String,
    pub count: i32,
    pub reason: String,
    pub comment: Option<String>,
    pub staff_id: Option<UserId>,
    pub staff_name: Option<String>,
    pub written_off_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<WriteOffRow> for WriteOff {
    fn from(value: WriteOffRow) -> Self {
        let WriteOffRow {
            write_off_id,
            menu_item_id,
            item_name,
            count,
            reason,
            comment,
            staff_id,
            staff_name,
            written_off_on,
            created_at,
        } = value;
        WriteOff {
            id: write_off_id,
            menu_item_id,
            item_name,
            count,
            reason,
            comment,
            staff_id,
            staff_name,
            written_off_on,
            created_at,
        }
    }
}

#[derive(FromRow)]
pub struct SubscriptionRow {
    pub subscription_id: SubscriptionId,
    pub student_id: UserId,
    pub start_date: NaiveDate,
    pub until_date: NaiveDate,
    pub plan: String,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = AppError;

    fn try_from(value: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Subscription {
            id: value.subscription_id,
            student_id: value.student_id,
            start_date: value.start_date,
            until_date: value.until_date,
            plan: parse_column("plan", &value.plan)?,
        })
    }
}
