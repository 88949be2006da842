use crate::model::{
    id::{ComplaintId, UserId},
    menu::MealType,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ComplaintStatus {
    New,
    InReview,
    Resolved,
    Rejected,
}

impl ComplaintStatus {
    pub fn is_open(self) -> bool {
        matches!(self, Self::New | Self::InReview)
    }

    /// new -> in_review -> resolved | rejected, with new allowed to skip
    /// the review step. Closed complaints stay closed.
    pub fn transition(self, to: ComplaintStatus) -> AppResult<ComplaintStatus> {
        let allowed = matches!(
            (self, to),
            (Self::New, Self::InReview | Self::Resolved | Self::Rejected)
                | (Self::InReview, Self::Resolved | Self::Rejected)
        );
        if allowed {
            Ok(to)
        } else {
            Err(AppError::InvalidTransition {
                from: self.to_string(),
                to: to.to_string(),
            })
        }
    }

    /// Staff answer action. Missing means resolved.
    pub fn from_action(value: Option<&str>) -> AppResult<Self> {
        match value {
            None => Ok(Self::Resolved),
            Some(v) => match v.parse() {
                Ok(Self::New) | Err(_) => Err(AppError::UnprocessableEntity(format!(
                    "unknown complaint action: {v}"
                ))),
                Ok(status) => Ok(status),
            },
        }
    }
}

/// Meal rating on a 1..=5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rating(i32);

impl Rating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    /// Out-of-range ratings are dropped rather than rejected.
    pub fn accept(value: Option<i32>) -> Option<Self> {
        value
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complaint {
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
    pub staff_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintScope {
    Mine(UserId),
    Open,
    All,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_outside_the_scale_are_discarded() {
        assert_eq!(Rating::accept(Some(1)).map(Rating::value), Some(1));
        assert_eq!(Rating::accept(Some(5)).map(Rating::value), Some(5));
        assert_eq!(Rating::accept(Some(0)), None);
        assert_eq!(Rating::accept(Some(6)), None);
        assert_eq!(Rating::accept(Some(-3)), None);
        assert_eq!(Rating::accept(None), None);
    }

    #[test]
    fn review_workflow() {
        use ComplaintStatus::*;
        assert_eq!(New.transition(InReview).unwrap(), InReview);
        assert_eq!(InReview.transition(Resolved).unwrap(), Resolved);
        assert_eq!(InReview.transition(Rejected).unwrap(), Rejected);
        assert_eq!(New.transition(Resolved).unwrap(), Resolved);
        assert_eq!(New.transition(Rejected).unwrap(), Rejected);

        assert!(InReview.transition(InReview).is_err());
        assert!(InReview.transition(New).is_err());
        assert!(Resolved.transition(Rejected).is_err());
        assert!(Rejected.transition(InReview).is_err());
    }

    #[test]
    fn answer_actions() {
        assert_eq!(
            ComplaintStatus::from_action(None).unwrap(),
            ComplaintStatus::Resolved
        );
        assert_eq!(
            ComplaintStatus::from_action(Some("in_review")).unwrap(),
            ComplaintStatus::InReview
        );
        assert!(ComplaintStatus::from_action(Some("new")).is_err());
        assert!(ComplaintStatus::from_action(Some("escalate")).is_err());
    }
}
