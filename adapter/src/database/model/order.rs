use super::parse_column;
use kernel::model::{
    id::{OrderId, UserId},
    order::Order,
};
use shared::error::AppError;
use sqlx::{
    types::chrono::{DateTime, Utc},
    FromRow,
};

#[derive(FromRow)]
pub struct OrderRow {
    pub order_id: OrderId,
    pub student_id: UserId,
    pub student_name: String,
    pub meal_type: String,
    pub item: String,
    pub count: i32,
    pub comment: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = AppError;

    fn try_from(value: OrderRow) -> Result<Self, Self::Error> {
        let OrderRow {
            order_id,
            student_id,
            student_name,
            meal_type,
            item,
            count,
            comment,
            status,
            created_at,
        } = value;
        Ok(Order {
            id: order_id,
            student_id,
            student_name,
            meal_type: parse_column("meal type", &meal_type)?,
            item,
            count,
            comment,
            status: parse_column("order status", &status)?,
            created_at,
        })
    }
}
