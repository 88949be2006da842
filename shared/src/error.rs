use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("insufficient funds: {required} required, {available} available")]
    InsufficientFunds { required: i64, available: i64 },
    #[error("not enough portions: {available} available")]
    InsufficientPortions { available: i32 },
    #[error("the student has no active subscription")]
    NoActiveSubscription,
    #[error("cannot change status from {from} to {to}")]
    InvalidTransition { from: String, to: String },
    #[error("this login is already taken")]
    LoginTaken,
    #[error("invalid login or password")]
    InvalidCredentials,
    #[error("authentication required")]
    UnauthenticatedError,
    #[error("insufficient permissions")]
    ForbiddenOperation,
    #[error("transaction could not be completed")]
    TransactionError(#[source] sqlx::Error),
    #[error("database operation failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("report storage failed")]
    ReportStorageError(#[source] std::io::Error),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("{0}")]
    ConversionEntityError(String),
}

impl AppError {
    /// Errors caused by what the user submitted. These are shown next to
    /// the originating form instead of failing the request.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AppError::UnprocessableEntity(_)
                | AppError::EntityNotFound(_)
                | AppError::ValidationError(_)
                | AppError::InsufficientFunds { .. }
                | AppError::InsufficientPortions { .. }
                | AppError::NoActiveSubscription
                | AppError::InvalidTransition { .. }
                | AppError::LoginTaken
                | AppError::InvalidCredentials
                | AppError::ForbiddenOperation
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, AppError::UnauthenticatedError) {
            return Redirect::to("/login").into_response();
        }

        if self.is_user_facing() {
            tracing::warn!(error.message = %self, "request rejected");
            return Json(serde_json::json!({ "error": self.to_string() })).into_response();
        }

        tracing::error!(
            error.cause_chain = ?self,
            error.message = %self,
            "Unexpected error happened"
        );
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accounting_failures_are_rendered_inline() {
        let res = AppError::InsufficientFunds {
            required: 120,
            available: 100,
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::OK);

        let res = AppError::ForbiddenOperation.into_response();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[test]
    fn unauthenticated_redirects_to_login() {
        let res = AppError::UnauthenticatedError.into_response();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(axum::http::header::LOCATION).unwrap(),
            "/login"
        );
    }

    #[test]
    fn infrastructure_failures_are_server_errors() {
        let res = AppError::NoRowsAffectedError("menu item".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!AppError::TransactionError(sqlx::Error::PoolTimedOut).is_user_facing());
    }
}
