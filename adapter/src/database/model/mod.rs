use shared::error::{AppError, AppResult};
use std::str::FromStr;

pub mod accounting;
pub mod auth;
pub mod complaint;
pub mod menu;
pub mod notice;
pub mod order;
pub mod procurement;
pub mod report;
pub mod user;

// Enum columns are stored as their lowercase names.
pub(crate) fn parse_column<T: FromStr>(column: &str, value: &str) -> AppResult<T> {
    value
        .parse()
        .map_err(|_| AppError::ConversionEntityError(format!("unexpected {column}: {value}")))
}
