use kernel::model::{
    id::{ReportId, UserId},
    report::Report,
};
use sqlx::{
    types::chrono::{DateTime, Utc},
    FromRow,
};

#[derive(FromRow)]
pub struct ReportRow {
    pub report_id: ReportId,
    pub number: i64,
    pub title: String,
    pub filename: String,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl From<ReportRow> for Report {
    fn from(value: ReportRow) -> Self {
        Report {
            id: value.report_id,
            number: value.number,
            title: value.title,
            filename: value.filename,
            created_by: value.created_by,
            created_at: value.created_at,
        }
    }
}
