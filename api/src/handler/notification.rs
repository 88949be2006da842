use super::PAGE_LIMIT;
use crate::{extractor::AuthorizedUser, model::notice::NotificationsResponse};
use axum::{extract::State, Json};
use kernel::model::notice::NoticeAudience;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_notifications(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<NotificationsResponse>> {
    let audience = NoticeAudience::for_user(&user.user.login, user.user.role);
    registry
        .notice_repository()
        .find_visible(&audience, PAGE_LIMIT)
        .await
        .map(NotificationsResponse::from)
        .map(Json)
}
