use super::form::{text, trimmed};
use garde::Validate;
use kernel::model::{
    id::UserId,
    notice::Recipient,
    role::Role,
    user::{event::CreateUser, User},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::IntoEnumIterator;

#[derive(Deserialize)]
pub struct RegisterQuery {
    #[serde(default, deserialize_with = "text")]
    pub role: Option<String>,
}

impl RegisterQuery {
    pub fn role(&self) -> Role {
        Role::from_form(self.role.as_deref())
    }
}

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[garde(length(min = 1))]
    pub name: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[garde(length(min = 1))]
    pub login: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[garde(length(min = 1))]
    pub work: String,
    #[serde(default)]
    #[garde(length(min = 1))]
    pub password1: String,
    #[serde(default)]
    #[garde(length(min = 1))]
    pub password2: String,
    #[serde(default, deserialize_with = "text")]
    #[garde(skip)]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "text")]
    #[garde(skip)]
    pub benefit: Option<String>,
    #[serde(default, deserialize_with = "text")]
    #[garde(skip)]
    pub allergy: Option<String>,
}

impl RegisterRequest {
    pub fn into_event(self, role: Role) -> AppResult<CreateUser> {
        if self.password1 != self.password2 {
            return Err(AppError::UnprocessableEntity(
                "passwords do not match".into(),
            ));
        }
        if Recipient::is_group_name(&self.login) {
            return Err(AppError::LoginTaken);
        }
        Ok(CreateUser::new(
            self.login,
            self.password1,
            self.name,
            self.work,
            role,
            self.benefit,
            self.allergy,
            0,
        ))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPageResponse {
    pub role: Role,
    pub code_required: bool,
    pub roles: Vec<Role>,
}

impl From<Role> for RegisterPageResponse {
    fn from(role: Role) -> Self {
        Self {
            role,
            code_required: role.is_staff(),
            roles: Role::iter().collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub login: String,
    pub name: String,
    pub work: String,
    pub role: Role,
    pub benefit: Option<String>,
    pub allergy: Option<String>,
    pub balance: i64,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            id,
            login,
            name,
            work,
            role,
            benefit,
            allergy,
            balance,
        } = value;
        Self {
            id,
            login,
            name,
            work,
            role,
            benefit,
            allergy,
            balance,
        }
    }
}

// student picker on the serve page
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: UserId,
    pub name: String,
    pub work: String,
}

impl From<User> for StudentSummary {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            name: value.name,
            work: value.work,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_passwords_are_rejected() {
        let req: RegisterRequest = serde_urlencoded::from_str(
            "name=Ivan&login=ivanov&work=7B&password1=a&password2=b",
        )
        .unwrap();
        assert!(req.validate(&()).is_ok());
        assert!(req.into_event(Role::Student).is_err());
    }

    #[test]
    fn notice_group_names_cannot_be_logins() {
        for login in ["students", "admin", "all", "cook", "Students"] {
            let body = format!("name=Ivan&login={login}&work=7B&password1=a&password2=a");
            let req: RegisterRequest = serde_urlencoded::from_str(&body).unwrap();
            assert!(req.validate(&()).is_ok());
            assert!(matches!(
                req.into_event(Role::Student),
                Err(AppError::LoginTaken)
            ));
        }
    }

    #[test]
    fn registration_fields_are_required() {
        let req: RegisterRequest =
            serde_urlencoded::from_str("name=Ivan&login=&password1=a&password2=a").unwrap();
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn new_accounts_start_with_an_empty_balance() {
        let req: RegisterRequest = serde_urlencoded::from_str(
            "name=Ivan&login=ivanov&work=7B&password1=a&password2=a&allergy=nuts&code=",
        )
        .unwrap();
        assert_eq!(req.code, None);
        let event = req.into_event(Role::Student).unwrap();
        assert_eq!(event.initial_balance, 0);
        assert_eq!(event.allergy.as_deref(), Some("nuts"));
    }
}
