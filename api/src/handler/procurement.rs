use super::PAGE_LIMIT;
use crate::{
    extractor::AuthorizedUser,
    model::procurement::{CreateProcurementRequest, ProcurementResponse, ProcurementsResponse},
};
use axum::{extract::State, Form, Json};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_procurement(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ProcurementsResponse>> {
    user.require_staff()?;

    registry
        .procurement_repository()
        .find_recent(PAGE_LIMIT)
        .await
        .map(ProcurementsResponse::from)
        .map(Json)
}

pub async fn create_procurement(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Form(req): Form<CreateProcurementRequest>,
) -> AppResult<Json<ProcurementResponse>> {
    user.require_staff()?;

    registry
        .procurement_repository()
        .create(req.into_event(&user.user))
        .await
        .map(ProcurementResponse::from)
        .map(Json)
}
