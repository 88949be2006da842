use super::{today, PAGE_LIMIT};
use crate::{
    extractor::AuthorizedUser,
    model::menu::{
        AvailabilityResponse, CreateMenuItemRequest, MenuHistoryResponse, MenuResponse,
        StockLineResponse,
    },
};
use axum::{extract::State, Form, Json};
use kernel::model::menu::event::PublishMenuItem;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_menu(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MenuResponse>> {
    let today = today();
    let menu = registry.menu_repository();
    menu.seed_day_if_empty(today).await?;
    menu.find_by_date(today)
        .await
        .map(|items| MenuResponse::new(today, items))
        .map(Json)
}

pub async fn add_menu_item(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Form(req): Form<CreateMenuItemRequest>,
) -> AppResult<Json<MenuResponse>> {
    user.require_staff()?;

    let today = today();
    let event = PublishMenuItem::new(req.into_event(today)?, user.user.name.clone());
    let menu = registry.menu_repository();
    let item = menu.publish(event).await?;
    let items = menu.find_by_date(today).await?;

    Ok(Json(
        MenuResponse::new(today, items).with_message(format!("Added to the menu: {}", item.name)),
    ))
}

pub async fn show_menu_history(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MenuHistoryResponse>> {
    registry
        .menu_repository()
        .find_history(PAGE_LIMIT)
        .await
        .map(MenuHistoryResponse::from)
        .map(Json)
}

pub async fn show_availability(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AvailabilityResponse>> {
    let date = today();
    let menu = registry.menu_repository();
    menu.seed_day_if_empty(date).await?;
    let stock = menu.availability(date).await?;
    Ok(Json(AvailabilityResponse {
        date,
        stock: stock.into_iter().map(StockLineResponse::from).collect(),
    }))
}
