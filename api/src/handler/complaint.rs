use super::{parse_path_id, COMPLAINT_LIMIT};
use crate::{
    extractor::AuthorizedUser,
    model::complaint::{
        AnswerComplaintRequest, ComplaintFormResponse, ComplaintListQuery, ComplaintResponse,
        ComplaintsResponse, CreateComplaintRequest,
    },
};
use axum::{
    extract::{Path, Query, State},
    Form, Json,
};
use garde::Validate;
use kernel::model::{complaint::ComplaintScope, id::ComplaintId, role::Role};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn complaint_form(_user: AuthorizedUser) -> Json<ComplaintFormResponse> {
    Json(ComplaintFormResponse::default())
}

pub async fn create_complaint(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Form(req): Form<CreateComplaintRequest>,
) -> AppResult<Json<ComplaintResponse>> {
    user.require_role(Role::Student)?;
    req.validate(&())?;

    registry
        .complaint_repository()
        .create(req.into_event(&user.user)?)
        .await
        .map(ComplaintResponse::from)
        .map(Json)
}

pub async fn show_complaints(
    user: AuthorizedUser,
    Query(query): Query<ComplaintListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ComplaintsResponse>> {
    let show_all = user.user.is_staff() && query.show_all();
    let scope = match (user.user.is_staff(), show_all) {
        (false, _) => ComplaintScope::Mine(user.id()),
        (true, false) => ComplaintScope::Open,
        (true, true) => ComplaintScope::All,
    };

    registry
        .complaint_repository()
        .find(scope, COMPLAINT_LIMIT)
        .await
        .map(|items| ComplaintsResponse::new(show_all, items))
        .map(Json)
}

pub async fn answer_complaint(
    user: AuthorizedUser,
    Path(complaint_id): Path<String>,
    State(registry): State<AppRegistry>,
    Form(req): Form<AnswerComplaintRequest>,
) -> AppResult<Json<ComplaintResponse>> {
    user.require_staff()?;
    let complaint_id: ComplaintId = parse_path_id(&complaint_id, "complaint")?;

    registry
        .complaint_repository()
        .answer(req.into_event(complaint_id, &user.user)?)
        .await
        .map(ComplaintResponse::from)
        .map(Json)
}
