use super::form::trimmed;
use garde::Validate;
use kernel::model::{id::UserId, role::Role};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[garde(length(min = 1))]
    pub login: String,
    #[serde(default)]
    #[garde(length(min = 1))]
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub user_id: UserId,
    pub role: Role,
    pub access_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPageResponse {
    pub title: &'static str,
    pub fields: [&'static str; 2],
}

impl Default for LoginPageResponse {
    fn default() -> Self {
        Self {
            title: "Sign in",
            fields: ["login", "password"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_login_fails_validation() {
        let req: LoginRequest = serde_urlencoded::from_str("login=+&password=x").unwrap();
        assert!(req.validate(&()).is_err());

        let req: LoginRequest = serde_urlencoded::from_str("password=x").unwrap();
        assert!(req.validate(&()).is_err());

        let req: LoginRequest = serde_urlencoded::from_str("login=student&password=student").unwrap();
        assert!(req.validate(&()).is_ok());
    }
}
