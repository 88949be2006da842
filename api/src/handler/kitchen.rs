use super::{today, KITCHEN_HISTORY_LIMIT};
use crate::{
    extractor::AuthorizedUser,
    model::kitchen::{ServePageResponse, ServeRequest, WriteOffPageResponse, WriteOffRequest},
};
use axum::{extract::State, Form, Json};
use registry::AppRegistry;
use shared::error::AppResult;

async fn serve_page(registry: &AppRegistry, message: Option<String>) -> AppResult<ServePageResponse> {
    let today = today();
    let menu = registry.menu_repository();
    menu.seed_day_if_empty(today).await?;

    let students = registry.user_repository().find_students().await?;
    let items = menu.find_by_date(today).await?;
    let history = registry
        .accounting_repository()
        .find_recent_serves(KITCHEN_HISTORY_LIMIT)
        .await?;
    Ok(ServePageResponse::new(students, items, history, message))
}

async fn write_off_page(
    registry: &AppRegistry,
    message: Option<String>,
) -> AppResult<WriteOffPageResponse> {
    let today = today();
    let menu = registry.menu_repository();
    menu.seed_day_if_empty(today).await?;

    let items = menu.find_by_date(today).await?;
    let history = registry
        .accounting_repository()
        .find_recent_write_offs(KITCHEN_HISTORY_LIMIT)
        .await?;
    Ok(WriteOffPageResponse::new(items, history, message))
}

pub async fn show_serve(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ServePageResponse>> {
    user.require_staff()?;
    serve_page(&registry, None).await.map(Json)
}

pub async fn serve_meal(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Form(req): Form<ServeRequest>,
) -> AppResult<Json<ServePageResponse>> {
    user.require_staff()?;

    let served = registry
        .accounting_repository()
        .serve(req.into_event(&user.user, today())?)
        .await?;
    let message = format!(
        "Served {} x{} to {} ({})",
        served.item_name, served.count, served.student_name, served.pay_type
    );
    serve_page(&registry, Some(message)).await.map(Json)
}

pub async fn show_write_off(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<WriteOffPageResponse>> {
    user.require_staff()?;
    write_off_page(&registry, None).await.map(Json)
}

pub async fn write_off(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Form(req): Form<WriteOffRequest>,
) -> AppResult<Json<WriteOffPageResponse>> {
    user.require_staff()?;

    let written_off = registry
        .accounting_repository()
        .write_off(req.into_event(&user.user, today())?)
        .await?;
    let message = format!(
        "Written off {} x{}: {}",
        written_off.item_name, written_off.count, written_off.reason
    );
    write_off_page(&registry, Some(message)).await.map(Json)
}
