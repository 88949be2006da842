use crate::model::{id::NoticeId, role::Role};
use chrono::{DateTime, Utc};
use std::fmt;

pub mod event;

pub const SYSTEM_SENDER: &str = "System";

/// Who a notice is addressed to: a broadcast group or a single login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Everyone,
    Students,
    Cooks,
    Admins,
    Login(String),
}

impl Recipient {
    pub fn as_str(&self) -> &str {
        match self {
            Recipient::Everyone => "all",
            Recipient::Students => "students",
            Recipient::Cooks => "cook",
            Recipient::Admins => "admin",
            Recipient::Login(login) => login,
        }
    }

    /// Group names share the recipient column with logins, so no account
    /// may be named after one.
    pub fn is_group_name(name: &str) -> bool {
        [
            Recipient::Everyone,
            Recipient::Students,
            Recipient::Cooks,
            Recipient::Admins,
        ]
        .iter()
        .any(|group| group.as_str().eq_ignore_ascii_case(name.trim()))
    }

    pub fn group(role: Role) -> Self {
        match role {
            Role::Student => Recipient::Students,
            Role::Cook => Recipient::Cooks,
            Role::Admin => Recipient::Admins,
        }
    }
}

impl From<String> for Recipient {
    fn from(value: String) -> Self {
        match value.as_str() {
            "all" => Recipient::Everyone,
            "students" => Recipient::Students,
            "cook" => Recipient::Cooks,
            "admin" => Recipient::Admins,
            _ => Recipient::Login(value),
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub title: String,
    pub text: Option<String>,
    pub sender: String,
    pub recipient: Recipient,
    pub created_at: DateTime<Utc>,
}

/// The part of the notice log a user may read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeAudience {
    Everything,
    Addressed(Vec<String>),
}

impl NoticeAudience {
    pub fn for_user(login: &str, role: Role) -> Self {
        if role == Role::Admin {
            return NoticeAudience::Everything;
        }
        NoticeAudience::Addressed(vec![
            login.to_string(),
            Recipient::Everyone.as_str().to_string(),
            Recipient::group(role).as_str().to_string(),
        ])
    }

    pub fn includes(&self, recipient: &Recipient) -> bool {
        match self {
            NoticeAudience::Everything => true,
            NoticeAudience::Addressed(names) => names.iter().any(|n| n == recipient.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipients_round_trip_through_storage_text() {
        for r in [
            Recipient::Everyone,
            Recipient::Students,
            Recipient::Cooks,
            Recipient::Admins,
            Recipient::Login("ivanov".into()),
        ] {
            assert_eq!(Recipient::from(r.to_string()), r);
        }
    }

    #[test]
    fn group_names_are_recognised_in_any_case() {
        for name in ["all", "students", "cook", "admin", "Students", " ADMIN "] {
            assert!(Recipient::is_group_name(name), "{name}");
        }
        assert!(!Recipient::is_group_name("student"));
        assert!(!Recipient::is_group_name("ivanov"));
    }

    #[test]
    fn admins_read_the_whole_log() {
        let audience = NoticeAudience::for_user("admin", Role::Admin);
        assert!(audience.includes(&Recipient::Login("someone".into())));
        assert!(audience.includes(&Recipient::Cooks));
    }

    #[test]
    fn students_read_their_own_and_broadcast_notices() {
        let audience = NoticeAudience::for_user("ivanov", Role::Student);
        assert!(audience.includes(&Recipient::Login("ivanov".into())));
        assert!(audience.includes(&Recipient::Everyone));
        assert!(audience.includes(&Recipient::Students));
        assert!(!audience.includes(&Recipient::Admins));
        assert!(!audience.includes(&Recipient::Login("petrov".into())));
    }

    #[test]
    fn cooks_read_the_kitchen_group() {
        let audience = NoticeAudience::for_user("cook", Role::Cook);
        assert!(audience.includes(&Recipient::Cooks));
        assert!(!audience.includes(&Recipient::Students));
    }
}
