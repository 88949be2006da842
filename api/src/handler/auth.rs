use crate::{
    extractor::AuthorizedUser,
    model::{
        auth::{AccessTokenResponse, LoginPageResponse, LoginRequest},
        user::{RegisterPageResponse, RegisterQuery, RegisterRequest, UserResponse},
    },
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
    Form, Json,
};
use garde::Validate;
use kernel::model::{auth::event::CreateToken, user::verify_registration_code};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn login_page() -> Json<LoginPageResponse> {
    Json(LoginPageResponse::default())
}

pub async fn login(
    State(registry): State<AppRegistry>,
    Form(req): Form<LoginRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    req.validate(&())?;

    let user_id = registry
        .auth_repository()
        .verify_user(&req.login, &req.password)
        .await?;
    let user = registry
        .user_repository()
        .find_current_user(user_id)
        .await?
        .ok_or(AppError::InvalidCredentials)?;
    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(user_id))
        .await?;

    tracing::info!(user.id = %user_id, user.role = %user.role, "signed in");
    Ok(Json(AccessTokenResponse {
        user_id,
        role: user.role,
        access_token: access_token.0,
    }))
}

pub async fn logout(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Redirect> {
    registry
        .auth_repository()
        .delete_token(user.access_token)
        .await
        .map(|_| Redirect::to("/login"))
}

pub async fn register_page(Query(query): Query<RegisterQuery>) -> Json<RegisterPageResponse> {
    Json(query.role().into())
}

pub async fn register(
    Query(query): Query<RegisterQuery>,
    State(registry): State<AppRegistry>,
    Form(req): Form<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    req.validate(&())?;

    let role = query.role();
    verify_registration_code(role, req.code.as_deref(), &registry.registration())?;

    registry
        .user_repository()
        .register(req.into_event(role)?)
        .await
        .map(|user| (StatusCode::CREATED, Json(user.into())))
}
