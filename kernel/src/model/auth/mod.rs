use serde::{Deserialize, Serialize};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn issue() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }
}
