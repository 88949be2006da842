use kernel::model::{id::NoticeId, notice::Notice};
use sqlx::{
    types::chrono::{DateTime, Utc},
    FromRow,
};

#[derive(FromRow)]
pub struct NoticeRow {
    pub notice_id: NoticeId,
    pub title: String,
    pub text: Option<String>,
    pub sender: String,
    pub recipient: String,
    pub created_at: DateTime<Utc>,
}

impl From<NoticeRow> for Notice {
    fn from(value: NoticeRow) -> Self {
        let NoticeRow {
            notice_id,
            title,
            text,
            sender,
            recipient,
            created_at,
        } = value;
        Notice {
            id: notice_id,
            title,
            text,
            sender,
            recipient: recipient.into(),
            created_at,
        }
    }
}
