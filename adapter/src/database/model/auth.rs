use crate::redis::model::{RedisKey, RedisValue};
use kernel::model::{auth::AccessToken, id::UserId};
use shared::error::{AppError, AppResult};
use std::str::FromStr;

pub struct AuthorizationKey(String);
pub struct AuthorizedUserId(UserId);

pub fn from(event: kernel::model::auth::event::CreateToken) -> (AuthorizationKey, AuthorizedUserId) {
    (
        AuthorizationKey(AccessToken::issue().0),
        AuthorizedUserId(event.user_id),
    )
}

impl From<AuthorizationKey> for AccessToken {
    fn from(key: AuthorizationKey) -> Self {
        Self(key.0)
    }
}

impl From<&AccessToken> for AuthorizationKey {
    fn from(token: &AccessToken) -> Self {
        Self(token.0.clone())
    }
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedUserId;

    fn inner(&self) -> String {
        format!("session:{}", self.0)
    }
}

impl RedisValue for AuthorizedUserId {
    fn inner(&self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<String> for AuthorizedUserId {
    type Error = AppError;

    fn try_from(s: String) -> AppResult<Self> {
        Ok(Self(UserId::from_str(&s)?))
    }
}

impl AuthorizedUserId {
    pub fn into_inner(self) -> UserId {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::auth::event::CreateToken;

    #[test]
    fn stored_user_id_survives_the_store() {
        let user_id = UserId::new();
        let (key, value) = from(CreateToken::new(user_id));
        assert!(key.inner().starts_with("session:"));
        let back = AuthorizedUserId::try_from(value.inner()).unwrap();
        assert_eq!(back.into_inner(), user_id);
    }

    #[test]
    fn garbage_in_the_store_is_an_error() {
        assert!(AuthorizedUserId::try_from("not-a-uuid".to_string()).is_err());
    }
}
