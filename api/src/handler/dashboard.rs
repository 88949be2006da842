use super::today;
use crate::{
    extractor::AuthorizedUser,
    model::{
        dashboard::DashboardResponse, notice::NoticeResponse,
        subscription::ActiveSubscriptionResponse,
    },
};
use axum::{extract::State, response::Redirect, Json};
use kernel::model::notice::NoticeAudience;
use registry::AppRegistry;
use shared::error::AppResult;

const FEED_LIMIT: i64 = 8;
const TOP_STOCK_LIMIT: i64 = 6;

pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

pub async fn show_dashboard(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<DashboardResponse>> {
    let today = today();
    let dashboard = registry.dashboard_repository();
    let stats = dashboard.stats(today).await?;
    let top_stock = dashboard.top_stock(today, TOP_STOCK_LIMIT).await?;

    let audience = NoticeAudience::for_user(&user.user.login, user.user.role);
    let notices = registry
        .notice_repository()
        .find_visible(&audience, FEED_LIMIT)
        .await?;

    let (balance, subscription) = if user.user.is_student() {
        let active = registry
            .accounting_repository()
            .find_active_subscription(user.id(), today)
            .await?;
        (
            Some(user.user.balance),
            active.map(|s| ActiveSubscriptionResponse::new(s, today)),
        )
    } else {
        (None, None)
    };

    Ok(Json(DashboardResponse {
        user: user.user.into(),
        stats: stats.into(),
        notices: notices.into_iter().map(NoticeResponse::from).collect(),
        top_stock: top_stock.into_iter().map(Into::into).collect(),
        balance,
        subscription,
    }))
}
