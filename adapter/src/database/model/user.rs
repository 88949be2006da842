use super::parse_column;
use kernel::model::{id::UserId, user::User};
use shared::error::AppError;
use sqlx::FromRow;

#[derive(FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub login: String,
    pub name: String,
    pub work: String,
    pub role: String,
    pub benefit: Option<String>,
    pub allergy: Option<String>,
    pub balance: i64,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            login,
            name,
            work,
            role,
            benefit,
            allergy,
            balance,
        } = value;
        Ok(User {
            id: user_id,
            login,
            name,
            work,
            role: parse_column("role", &role)?,
            benefit,
            allergy,
            balance,
        })
    }
}

// only read when checking a password
#[derive(FromRow)]
pub struct CredentialRow {
    pub user_id: UserId,
    pub password_hash: String,
}
