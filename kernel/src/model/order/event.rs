use super::OrderStatus;
use crate::model::{
    id::{OrderId, UserId},
    menu::MealType,
};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateOrder {
    pub student_id: UserId,
    pub student_name: String,
    pub meal_type: MealType,
    pub item: String,
    pub count: i32,
    pub comment: Option<String>,
}

#[derive(Debug, new)]
pub struct DecideOrder {
    pub order_id: OrderId,
    pub decision: OrderStatus,
    pub decided_by: String,
}
