use crate::database::{
    model::{
        auth::{self, AuthorizationKey},
        user::CredentialRow,
    },
    ConnectionPool,
};
use crate::redis::RedisClient;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    auth::{event::CreateToken, AccessToken},
    id::UserId,
};
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let key = AuthorizationKey::from(access_token);
        self.kv
            .get(&key)
            .await
            .map(|value| value.map(|v| v.into_inner()))
    }

    async fn verify_user(&self, login: &str, password: &str) -> AppResult<UserId> {
        let row: Option<CredentialRow> = sqlx::query_as(
            r#"
                SELECT user_id, password_hash
                FROM users
                WHERE login = $1
            "#,
        )
        .bind(login.trim())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::InvalidCredentials);
        };
        if !bcrypt::verify(password, &row.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }
        Ok(row.user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let (key, value) = auth::from(event);
        self.kv.set_ex(&key, &value, self.ttl).await?;
        Ok(key.into())
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        let key = AuthorizationKey::from(&access_token);
        self.kv.delete(&key).await
    }
}
