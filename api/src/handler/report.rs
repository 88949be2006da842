use super::{parse_path_id, today, PAGE_LIMIT};
use crate::{
    extractor::AuthorizedUser,
    model::report::{ReportResponse, ReportsResponse},
};
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use kernel::model::{id::ReportId, report::CreateReport, role::Role};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_reports(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReportsResponse>> {
    user.require_role(Role::Admin)?;

    registry
        .report_repository()
        .find_all(PAGE_LIMIT)
        .await
        .map(ReportsResponse::from)
        .map(Json)
}

pub async fn create_report(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReportResponse>> {
    user.require_role(Role::Admin)?;

    let event = CreateReport::new(
        today(),
        Local::now().naive_local(),
        user.id(),
        user.user.name.clone(),
    );
    registry
        .report_repository()
        .create(event)
        .await
        .map(ReportResponse::from)
        .map(Json)
}

pub async fn download_report(
    user: AuthorizedUser,
    Path(report_id): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    user.require_role(Role::Admin)?;
    let report_id: ReportId = parse_path_id(&report_id, "report")?;

    let reports = registry.report_repository();
    let report = reports
        .find_by_id(report_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("report not found".into()))?;
    let body = reports.read_contents(&report).await?;

    let disposition = format!("attachment; filename=\"{}\"", report.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
