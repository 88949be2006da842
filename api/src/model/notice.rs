use chrono::{DateTime, Utc};
use kernel::model::{id::NoticeId, notice::Notice};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeResponse {
    pub id: NoticeId,
    pub title: String,
    pub text: Option<String>,
    pub sender: String,
    pub recipient: String,
    pub created_at: DateTime<Utc>,
}

impl From<Notice> for NoticeResponse {
    fn from(value: Notice) -> Self {
        Self {
            id: value.id,
            title: value.title,
            text: value.text,
            sender: value.sender,
            recipient: value.recipient.to_string(),
            created_at: value.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsResponse {
    pub items: Vec<NoticeResponse>,
}

impl From<Vec<Notice>> for NotificationsResponse {
    fn from(value: Vec<Notice>) -> Self {
        Self {
            items: value.into_iter().map(NoticeResponse::from).collect(),
        }
    }
}
