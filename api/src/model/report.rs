use chrono::{DateTime, Utc};
use kernel::model::{id::ReportId, report::Report};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: ReportId,
    pub number: i64,
    pub title: String,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportResponse {
    fn from(value: Report) -> Self {
        Self {
            id: value.id,
            number: value.number,
            title: value.title,
            filename: value.filename,
            created_at: value.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsResponse {
    pub items: Vec<ReportResponse>,
}

impl From<Vec<Report>> for ReportsResponse {
    fn from(value: Vec<Report>) -> Self {
        Self {
            items: value.into_iter().map(ReportResponse::from).collect(),
        }
    }
}
