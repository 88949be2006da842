use chrono::{Local, NaiveDate};
use shared::error::{AppError, AppResult};
use std::str::FromStr;

pub mod auth;
pub mod complaint;
pub mod dashboard;
pub mod health;
pub mod kitchen;
pub mod menu;
pub mod notification;
pub mod order;
pub mod payment;
pub mod procurement;
pub mod report;
pub mod subscription;

/// Business day in the server's local time zone.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Row caps for list pages.
pub(crate) const PAGE_LIMIT: i64 = 200;
pub(crate) const KITCHEN_HISTORY_LIMIT: i64 = 100;
pub(crate) const COMPLAINT_LIMIT: i64 = 300;

/// Ids taken from the URL path. A segment that is not an id is reported
/// like an unknown one, inline rather than as a bare 400.
pub(crate) fn parse_path_id<T: FromStr>(raw: &str, what: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::EntityNotFound(format!("{what} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use kernel::model::id::OrderId;

    #[test]
    fn malformed_path_ids_are_reported_inline() {
        let err = parse_path_id::<OrderId>("not-an-id", "order").unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));
        assert_eq!(
            err.into_response().status(),
            axum::http::StatusCode::OK
        );

        let id = OrderId::new();
        assert_eq!(parse_path_id::<OrderId>(&id.to_string(), "order").unwrap(), id);
    }
}
