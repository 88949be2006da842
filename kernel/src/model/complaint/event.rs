use super::{ComplaintStatus, Rating};
use crate::model::{
    id::{ComplaintId, UserId},
    menu::MealType,
};
use chrono::NaiveDate;
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateComplaint {
    pub student_id: UserId,
    pub student_name: String,
    pub meal_date: Option<NaiveDate>,
    pub meal_type: Option<MealType>,
    pub item: Option<String>,
    pub rating: Option<Rating>,
    pub text: String,
}

#[derive(Debug, new)]
pub struct AnswerComplaint {
    pub complaint_id: ComplaintId,
    pub status: ComplaintStatus,
    pub answer: Option<String>,
    pub staff_id: UserId,
    pub staff_name: String,
}
