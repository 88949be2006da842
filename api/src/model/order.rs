use super::form::{lenient_i32, text};
use chrono::{DateTime, Utc};
use kernel::model::{
    id::{OrderId, UserId},
    menu::MealType,
    order::{event::CreateOrder, Order, OrderStatus},
    user::User,
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default, deserialize_with = "text")]
    pub meal_type: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub item: Option<String>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub count: Option<i32>,
    #[serde(default, deserialize_with = "text")]
    pub comment: Option<String>,
}

impl CreateOrderRequest {
    pub fn into_event(self, student: &User) -> AppResult<CreateOrder> {
        let meal_type = MealType::from_form(self.meal_type.as_deref())?;
        let item = self
            .item
            .ok_or_else(|| AppError::UnprocessableEntity("the dish is required".into()))?;
        let count = self.count.unwrap_or(1);
        if count <= 0 {
            return Err(AppError::UnprocessableEntity(
                "the number of portions must be positive".into(),
            ));
        }
        Ok(CreateOrder::new(
            student.id,
            student.name.clone(),
            meal_type,
            item,
            count,
            self.comment,
        ))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub student_id: UserId,
    pub student_name: String,
    pub meal_type: MealType,
    pub item: String,
    pub count: i32,
    pub comment: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        let Order {
            id,
            student_id,
            student_name,
            meal_type,
            item,
            count,
            comment,
            status,
            created_at,
        } = value;
        Self {
            id,
            student_id,
            student_name,
            meal_type,
            item,
            count,
            comment,
            status,
            created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersResponse {
    pub items: Vec<OrderResponse>,
}

impl From<Vec<Order>> for OrdersResponse {
    fn from(value: Vec<Order>) -> Self {
        Self {
            items: value.into_iter().map(OrderResponse::from).collect(),
        }
    }
}
