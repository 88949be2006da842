use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Student,
    Cook,
    Admin,
}

impl Role {
    /// Cooks and admins run the kitchen: serving, write-offs, orders,
    /// complaints and procurement.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Cook | Role::Admin)
    }

    /// Registration falls back to a student account for unknown roles.
    pub fn from_form(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(Role::Student)
    }
}
