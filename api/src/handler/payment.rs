use super::PAGE_LIMIT;
use crate::{
    extractor::AuthorizedUser,
    model::payment::{LedgerEntryResponse, PaymentsResponse, StudentQuery, TopUpRequest},
};
use axum::{
    extract::{Query, State},
    Form, Json,
};
use kernel::model::id::UserId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

async fn payments_page(
    registry: &AppRegistry,
    student_id: UserId,
    message: Option<String>,
) -> AppResult<PaymentsResponse> {
    let student = registry
        .user_repository()
        .find_current_user(student_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("student not found".into()))?;
    let transactions = registry
        .accounting_repository()
        .find_ledger(student_id, PAGE_LIMIT)
        .await?;

    Ok(PaymentsResponse {
        student_id,
        balance: student.balance,
        transactions: transactions
            .into_iter()
            .map(LedgerEntryResponse::from)
            .collect(),
        message,
    })
}

pub async fn show_payments(
    user: AuthorizedUser,
    Query(query): Query<StudentQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaymentsResponse>> {
    let student_id = user.student_scope(query.student_id);
    payments_page(&registry, student_id, None).await.map(Json)
}

pub async fn top_up(
    user: AuthorizedUser,
    Query(query): Query<StudentQuery>,
    State(registry): State<AppRegistry>,
    Form(req): Form<TopUpRequest>,
) -> AppResult<Json<PaymentsResponse>> {
    let student_id = user.student_scope(query.student_id);
    let entry = registry
        .accounting_repository()
        .top_up(req.into_event(student_id))
        .await?;

    let message = format!("Balance topped up by {}", entry.amount);
    payments_page(&registry, student_id, Some(message))
        .await
        .map(Json)
}
