use crate::model::{
    id::{OrderId, UserId},
    menu::MealType,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    New,
    Approved,
    Rejected,
}

impl OrderStatus {
    /// Only fresh orders can be decided, and a decision is final.
    pub fn transition(self, to: OrderStatus) -> AppResult<OrderStatus> {
        match (self, to) {
            (OrderStatus::New, OrderStatus::Approved | OrderStatus::Rejected) => Ok(to),
            _ => Err(AppError::InvalidTransition {
                from: self.to_string(),
                to: to.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orders_can_be_approved_or_rejected() {
        assert_eq!(
            OrderStatus::New.transition(OrderStatus::Approved).unwrap(),
            OrderStatus::Approved
        );
        assert_eq!(
            OrderStatus::New.transition(OrderStatus::Rejected).unwrap(),
            OrderStatus::Rejected
        );
    }

    #[test]
    fn decided_orders_are_never_reopened() {
        for from in [OrderStatus::Approved, OrderStatus::Rejected] {
            for to in [OrderStatus::New, OrderStatus::Approved, OrderStatus::Rejected] {
                assert!(from.transition(to).is_err());
            }
        }
        assert!(OrderStatus::New.transition(OrderStatus::New).is_err());
    }
}
