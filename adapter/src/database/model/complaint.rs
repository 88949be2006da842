use super::parse_column;
use kernel::model::{
    complaint::{Complaint, Rating},
    id::{ComplaintId, UserId},
};
use shared::error::AppError;
use sqlx::{
    types::chrono::{DateTime, NaiveDate, Utc},
    FromRow,
};

#[derive(FromRow)]
pub struct ComplaintRow {
    pub complaint_id: ComplaintId,
    pub student_id: UserId,
    pub student_name: String,
    pub meal_date: Option<NaiveDate>,
    pub meal_type: Option<String>,
    pub item: Option<String>,
    pub rating: Option<i32>,
    pub text: String,
    pub status: String,
    pub answer: Option<String>,
    pub answered_at: Option<DateTime<Utc>>,
    pub staff_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ComplaintRow> for Complaint {
    type Error = AppError;

    fn try_from(value: ComplaintRow) -> Result<Self, Self::Error> {
        let ComplaintRow {
            complaint_id,
            student_id,
            student_name,
            meal_date,
            meal_type,
            item,
            rating,
            text,
            status,
            answer,
            answered_at,
            staff_id,
            created_at,
        } = value;
        Ok(Complaint {
            id: complaint_id,
            student_id,
            student_name,
            meal_date,
            meal_type: meal_type
                .map(|m| parse_column("meal type", &m))
                .transpose()?,
            item,
            rating: Rating::accept(rating),
            text,
            status: parse_column("complaint status", &status)?,
            answer,
            answered_at,
            staff_id,
            created_at,
        })
    }
}
