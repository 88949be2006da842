use super::today;
use crate::{
    extractor::AuthorizedUser,
    model::{
        payment::StudentQuery,
        subscription::{BuySubscriptionRequest, SubscriptionsResponse},
    },
};
use axum::{
    extract::{Query, State},
    Form, Json,
};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_subscriptions(
    user: AuthorizedUser,
    Query(query): Query<StudentQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SubscriptionsResponse>> {
    let today = today();
    let student_id = user.student_scope(query.student_id);
    registry
        .accounting_repository()
        .find_active_subscription(student_id, today)
        .await
        .map(|active| SubscriptionsResponse::new(student_id, active, today, None))
        .map(Json)
}

pub async fn buy_subscription(
    user: AuthorizedUser,
    Query(query): Query<StudentQuery>,
    State(registry): State<AppRegistry>,
    Form(req): Form<BuySubscriptionRequest>,
) -> AppResult<Json<SubscriptionsResponse>> {
    let today = today();
    let student_id = user.student_scope(query.student_id);
    let accounting = registry.accounting_repository();

    let bought = accounting
        .buy_subscription(req.into_event(student_id, today)?)
        .await?;
    let message = format!(
        "Subscription {} runs from {} to {}",
        bought.plan, bought.start_date, bought.until_date
    );

    accounting
        .find_active_subscription(student_id, today)
        .await
        .map(|active| SubscriptionsResponse::new(student_id, active, today, Some(message)))
        .map(Json)
}
