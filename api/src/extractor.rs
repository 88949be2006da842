use axum::{async_trait, extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{auth::AccessToken, id::UserId, role::Role, user::User};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

/// The signed-in user behind a request's bearer token.
pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.id
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }

    pub fn require_staff(&self) -> AppResult<()> {
        if self.user.is_staff() {
            Ok(())
        } else {
            Err(AppError::ForbiddenOperation)
        }
    }

    pub fn require_role(&self, role: Role) -> AppResult<()> {
        if self.user.role == role {
            Ok(())
        } else {
            Err(AppError::ForbiddenOperation)
        }
    }

    /// Student whose account a payment or subscription request applies to.
    /// Admins may name one with `?student_id=`; everyone else gets their own.
    pub fn student_scope(&self, requested: Option<UserId>) -> UserId {
        match requested {
            Some(student_id) if self.is_admin() => student_id,
            _ => self.id(),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthenticatedError)?;
        let access_token = AccessToken(bearer.token().to_string());

        let user_id = registry
            .auth_repository()
            .fetch_user_id_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        let user = registry
            .user_repository()
            .find_current_user(user_id)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        Ok(Self { access_token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in(role: Role) -> AuthorizedUser {
        AuthorizedUser {
            access_token: AccessToken::issue(),
            user: User {
                id: UserId::new(),
                login: role.to_string(),
                name: "Someone".into(),
                work: String::new(),
                role,
                benefit: None,
                allergy: None,
                balance: 0,
            },
        }
    }

    #[test]
    fn only_admins_act_for_other_students() {
        let other = UserId::new();

        let admin = signed_in(Role::Admin);
        assert_eq!(admin.student_scope(Some(other)), other);
        assert_eq!(admin.student_scope(None), admin.id());

        let student = signed_in(Role::Student);
        assert_eq!(student.student_scope(Some(other)), student.id());
    }

    #[test]
    fn staff_checks() {
        assert!(signed_in(Role::Cook).require_staff().is_ok());
        assert!(matches!(
            signed_in(Role::Student).require_staff(),
            Err(AppError::ForbiddenOperation)
        ));
        assert!(signed_in(Role::Cook).require_role(Role::Admin).is_err());
    }
}
