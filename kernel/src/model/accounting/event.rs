use super::{subscription::SubscriptionPlan, FundingSource, PayType};
use crate::model::id::{MenuItemId, UserId};
use chrono::NaiveDate;
use derive_new::new;

/// Staff hands `count` portions of a menu item to a student.
#[derive(Debug, new)]
pub struct ServeMeal {
    pub student_id: UserId,
    pub menu_item_id: MenuItemId,
    pub count: i32,
    pub pay_type: PayType,
    pub comment: Option<String>,
    pub staff_id: UserId,
    pub staff_name: String,
    pub today: NaiveDate,
}

#[derive(Debug, new)]
pub struct WriteOffPortions {
    pub menu_item_id: MenuItemId,
    pub count: i32,
    pub reason: String,
    pub comment: Option<String>,
    pub staff_id: UserId,
    pub staff_name: String,
    pub today: NaiveDate,
}

#[derive(Debug, new)]
pub struct TopUp {
    pub student_id: UserId,
    pub amount: i64,
    // free-form payment method recorded in the ledger note
    pub method: String,
}

#[derive(Debug, new)]
pub struct BuySubscription {
    pub student_id: UserId,
    pub plan: SubscriptionPlan,
    pub pay_from: FundingSource,
    pub today: NaiveDate,
}
