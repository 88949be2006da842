use super::form::{lenient_date, lenient_i32, text, trimmed};
use chrono::{DateTime, NaiveDate, Utc};
use garde::Validate;
use kernel::model::{
    complaint::{
        event::{AnswerComplaint, CreateComplaint},
        Complaint, ComplaintStatus, Rating,
    },
    id::{ComplaintId, UserId},
    menu::MealType,
    user::User,
};
use serde::{Deserialize, Serialize};
use shared::error::AppResult;
use strum::IntoEnumIterator;

#[derive(Deserialize, Validate)]
pub struct CreateComplaintRequest {
    #[garde(skip)]
    #[serde(default, deserialize_with = "lenient_date")]
    pub meal_date: Option<NaiveDate>,
    #[garde(skip)]
    #[serde(default, deserialize_with = "text")]
    pub meal_type: Option<String>,
    #[garde(skip)]
    #[serde(default, deserialize_with = "text")]
    pub item: Option<String>,
    #[garde(skip)]
    #[serde(default, deserialize_with = "lenient_i32")]
    pub rating: Option<i32>,
    #[garde(length(min = 1))]
    #[serde(default, deserialize_with = "trimmed")]
    pub text: String,
}

impl CreateComplaintRequest {
    /// The meal type is optional here, but a value that names no meal
    /// type is still an error.
    pub fn into_event(self, student: &User) -> AppResult<CreateComplaint> {
        let meal_type = self
            .meal_type
            .as_deref()
            .map(|v| MealType::from_form(Some(v)))
            .transpose()?;
        Ok(CreateComplaint::new(
            student.id,
            student.name.clone(),
            self.meal_date,
            meal_type,
            self.item,
            Rating::accept(self.rating),
            self.text,
        ))
    }
}

#[derive(Deserialize, Default)]
pub struct ComplaintListQuery {
    #[serde(default, deserialize_with = "text")]
    pub all: Option<String>,
}

impl ComplaintListQuery {
    pub fn show_all(&self) -> bool {
        matches!(self.all.as_deref(), Some("1" | "true" | "yes" | "on"))
    }
}

#[derive(Deserialize)]
pub struct AnswerComplaintRequest {
    #[serde(default, deserialize_with = "text")]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub action: Option<String>,
}

impl AnswerComplaintRequest {
    pub fn into_event(self, complaint_id: ComplaintId, staff: &User) -> AppResult<AnswerComplaint> {
        Ok(AnswerComplaint::new(
            complaint_id,
            ComplaintStatus::from_action(self.action.as_deref())?,
            self.answer,
            staff.id,
            staff.name.clone(),
        ))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintResponse {
    pub id: ComplaintId,
    pub student_id: UserId,
    pub student_name: String,
    pub meal_date: Option<NaiveDate>,
    pub meal_type: Option<MealType>,
    pub item: Option<String>,
    pub rating: Option<Rating>,
    pub text: String,
    pub status: ComplaintStatus,
    pub answer: Option<String>,
    pub answered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Complaint> for ComplaintResponse {
    fn from(value: Complaint) -> Self {
        let Complaint {
            id,
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
            staff_id: _,
            created_at,
        } = value;
        Self {
            id,
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
            created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintsResponse {
    pub show_all: bool,
    pub items: Vec<ComplaintResponse>,
}

impl ComplaintsResponse {
    pub fn new(show_all: bool, items: Vec<Complaint>) -> Self {
        Self {
            show_all,
            items: items.into_iter().map(ComplaintResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintFormResponse {
    pub meal_types: Vec<MealType>,
    pub rating_min: i32,
    pub rating_max: i32,
}

impl Default for ComplaintFormResponse {
    fn default() -> Self {
        Self {
            meal_types: MealType::iter().collect(),
            rating_min: Rating::MIN,
            rating_max: Rating::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::role::Role;

    fn student() -> User {
        User {
            id: UserId::new(),
            login: "student".into(),
            name: "Student".into(),
            work: "9A".into(),
            role: Role::Student,
            benefit: None,
            allergy: None,
            balance: 0,
        }
    }

    #[test]
    fn out_of_range_rating_is_dropped_and_bad_dates_ignored() {
        let req: CreateComplaintRequest = serde_urlencoded::from_str(
            "meal_date=yesterday&meal_type=snack&rating=9&text=Cold+soup",
        )
        .unwrap();
        assert!(req.validate(&()).is_ok());
        let event = req.into_event(&student()).unwrap();
        assert_eq!(event.meal_date, None);
        assert_eq!(event.meal_type, Some(MealType::Snack));
        assert_eq!(event.rating, None);
        assert_eq!(event.text, "Cold soup");
    }

    #[test]
    fn complaint_text_is_required() {
        let req: CreateComplaintRequest = serde_urlencoded::from_str("rating=3&text=+++").unwrap();
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn staff_listing_flag() {
        let q: ComplaintListQuery = serde_urlencoded::from_str("all=1").unwrap();
        assert!(q.show_all());
        let q: ComplaintListQuery = serde_urlencoded::from_str("").unwrap();
        assert!(!q.show_all());
    }
}
