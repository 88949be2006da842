use super::{notice::NoticeResponse, subscription::ActiveSubscriptionResponse, user::UserResponse};
use kernel::model::dashboard::{DashboardStats, StockLevel};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub menu_today: i64,
    pub served_today: i64,
    pub written_off_today: i64,
    pub orders_new: i64,
    pub orders_approved: i64,
}

impl From<DashboardStats> for StatsResponse {
    fn from(value: DashboardStats) -> Self {
        let DashboardStats {
            menu_today,
            served_today,
            written_off_today,
            orders_new,
            orders_approved,
        } = value;
        Self {
            menu_today,
            served_today,
            written_off_today,
            orders_new,
            orders_approved,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevelResponse {
    pub name: String,
    pub available: i64,
}

impl From<StockLevel> for StockLevelResponse {
    fn from(value: StockLevel) -> Self {
        Self {
            name: value.name,
            available: value.available,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user: UserResponse,
    pub stats: StatsResponse,
    pub notices: Vec<NoticeResponse>,
    pub top_stock: Vec<StockLevelResponse>,
    /// Only filled in for students.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<ActiveSubscriptionResponse>,
}
