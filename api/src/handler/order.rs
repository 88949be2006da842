use super::{parse_path_id, PAGE_LIMIT};
use crate::{
    extractor::AuthorizedUser,
    model::order::{CreateOrderRequest, OrderResponse, OrdersResponse},
};
use axum::{
    extract::{Path, State},
    Form, Json,
};
use kernel::model::{
    id::OrderId,
    order::{event::DecideOrder, OrderStatus},
    role::Role,
};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_orders(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<OrdersResponse>> {
    let orders = registry.order_repository();
    let items = if user.user.is_staff() {
        orders.find_all(PAGE_LIMIT).await?
    } else {
        orders.find_by_student(user.id(), PAGE_LIMIT).await?
    };
    Ok(Json(items.into()))
}

pub async fn create_order(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Form(req): Form<CreateOrderRequest>,
) -> AppResult<Json<OrderResponse>> {
    user.require_role(Role::Student)?;

    registry
        .order_repository()
        .create(req.into_event(&user.user)?)
        .await
        .map(OrderResponse::from)
        .map(Json)
}

async fn decide(
    user: AuthorizedUser,
    registry: AppRegistry,
    order_id: OrderId,
    decision: OrderStatus,
) -> AppResult<Json<OrderResponse>> {
    user.require_staff()?;

    registry
        .order_repository()
        .decide(DecideOrder::new(order_id, decision, user.user.name.clone()))
        .await
        .map(OrderResponse::from)
        .map(Json)
}

pub async fn approve_order(
    user: AuthorizedUser,
    Path(order_id): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<OrderResponse>> {
    let order_id = parse_path_id(&order_id, "order")?;
    decide(user, registry, order_id, OrderStatus::Approved).await
}

pub async fn reject_order(
    user: AuthorizedUser,
    Path(order_id): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<OrderResponse>> {
    let order_id = parse_path_id(&order_id, "order")?;
    decide(user, registry, order_id, OrderStatus::Rejected).await
}
