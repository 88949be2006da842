use crate::model::{id::UserId, role::Role};
use shared::{
    config::RegistrationConfig,
    error::{AppError, AppResult},
};
pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub login: String,
    pub name: String,
    // class for students, workplace for staff
    pub work: String,
    pub role: Role,
    pub benefit: Option<String>,
    pub allergy: Option<String>,
    pub balance: i64,
}

impl User {
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Accounts created on an empty installation so every role can sign in.
pub fn default_accounts() -> Vec<event::CreateUser> {
    vec![
        event::CreateUser::new(
            "admin".into(),
            "admin".into(),
            "Administrator".into(),
            "Head office".into(),
            Role::Admin,
            None,
            None,
            0,
        ),
        event::CreateUser::new(
            "cook".into(),
            "cook".into(),
            "Cook".into(),
            "Canteen".into(),
            Role::Cook,
            None,
            None,
            0,
        ),
        event::CreateUser::new(
            "student".into(),
            "student".into(),
            "Student".into(),
            "7B".into(),
            Role::Student,
            None,
            None,
            500,
        ),
    ]
}

/// Staff accounts need their role's registration code. Students may leave
/// the code out, but a code they do give must be right.
pub fn verify_registration_code(
    role: Role,
    supplied: Option<&str>,
    codes: &RegistrationConfig,
) -> AppResult<()> {
    let expected = match role {
        Role::Student => &codes.student_code,
        Role::Cook => &codes.cook_code,
        Role::Admin => &codes.admin_code,
    };
    match supplied.map(str::trim).filter(|c| !c.is_empty()) {
        None if role == Role::Student => Ok(()),
        Some(code) if code == expected => Ok(()),
        _ => Err(AppError::UnprocessableEntity(
            "invalid registration code".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes() -> RegistrationConfig {
        RegistrationConfig {
            student_code: "1111".into(),
            cook_code: "2222".into(),
            admin_code: "1234".into(),
            seed_defaults: false,
        }
    }

    #[test]
    fn staff_roles_require_their_code() {
        assert!(verify_registration_code(Role::Cook, Some("2222"), &codes()).is_ok());
        assert!(verify_registration_code(Role::Cook, Some("1234"), &codes()).is_err());
        assert!(verify_registration_code(Role::Admin, None, &codes()).is_err());
        assert!(verify_registration_code(Role::Admin, Some(" 1234 "), &codes()).is_ok());
    }

    #[test]
    fn student_code_is_optional_but_checked() {
        assert!(verify_registration_code(Role::Student, None, &codes()).is_ok());
        assert!(verify_registration_code(Role::Student, Some(""), &codes()).is_ok());
        assert!(verify_registration_code(Role::Student, Some("1111"), &codes()).is_ok());
        assert!(verify_registration_code(Role::Student, Some("9999"), &codes()).is_err());
    }

    #[test]
    fn only_the_student_account_starts_with_money() {
        let accounts = default_accounts();
        assert_eq!(accounts.len(), 3);
        assert!(accounts
            .iter()
            .all(|a| (a.role == Role::Student) == (a.initial_balance > 0)));
    }
}
