use crate::model::id::{SubscriptionId, UserId};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubscriptionPlan {
    #[default]
    Month,
    Quarter,
    Year,
}

impl SubscriptionPlan {
    /// Unknown plan names are sold at month terms.
    pub fn from_form(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    pub fn cost(self) -> i64 {
        match self {
            Self::Month => 2000,
            Self::Quarter => 5500,
            Self::Year => 18000,
        }
    }

    pub fn duration_days(self) -> u64 {
        match self {
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    /// Validity window for a purchase made on `today`. A new subscription
    /// starts the day after the latest one ends, so purchases queue up
    /// instead of overlapping.
    pub fn window(self, today: NaiveDate, latest_until: Option<NaiveDate>) -> (NaiveDate, NaiveDate) {
        let start = match latest_until.and_then(|until| until.checked_add_days(Days::new(1))) {
            Some(next_day) if next_day > today => next_day,
            _ => today,
        };
        let until = start + Days::new(self.duration_days());
        (start, until)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub student_id: UserId,
    pub start_date: NaiveDate,
    pub until_date: NaiveDate,
    pub plan: SubscriptionPlan,
}

impl Subscription {
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.until_date >= today
    }

    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.until_date - today).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn plan_table() {
        assert_eq!(SubscriptionPlan::Month.cost(), 2000);
        assert_eq!(SubscriptionPlan::Quarter.cost(), 5500);
        assert_eq!(SubscriptionPlan::Year.cost(), 18000);
        assert_eq!(SubscriptionPlan::Year.duration_days(), 365);
        assert_eq!(
            SubscriptionPlan::from_form(Some("weekly")),
            SubscriptionPlan::Month
        );
        assert_eq!(SubscriptionPlan::from_form(None), SubscriptionPlan::Month);
        assert_eq!(
            SubscriptionPlan::from_form(Some("quarter")),
            SubscriptionPlan::Quarter
        );
    }

    #[test]
    fn first_subscription_starts_today() {
        let today = day(2026, 10, 16);
        let (start, until) = SubscriptionPlan::Month.window(today, None);
        assert_eq!(start, today);
        assert_eq!(until, day(2026, 11, 15));
    }

    #[test]
    fn expired_subscription_does_not_push_the_start() {
        let today = day(2026, 10, 16);
        let (start, _) = SubscriptionPlan::Month.window(today, Some(day(2026, 9, 1)));
        assert_eq!(start, today);
        // ended yesterday: the next day is today
        let (start, _) = SubscriptionPlan::Month.window(today, Some(day(2026, 10, 15)));
        assert_eq!(start, today);
    }

    #[test]
    fn back_to_back_purchases_stack() {
        let today = day(2026, 10, 16);
        let (_, first_until) = SubscriptionPlan::Month.window(today, None);
        let (second_start, second_until) =
            SubscriptionPlan::Month.window(today, Some(first_until));
        assert_eq!(second_start, first_until + Days::new(1));
        assert_eq!(second_until, today + Days::new(61));
        assert!(second_until > first_until);
    }

    #[test]
    fn validity_is_derived_from_until_date() {
        let sub = Subscription {
            id: SubscriptionId::new(),
            student_id: UserId::new(),
            start_date: day(2026, 9, 16),
            until_date: day(2026, 10, 16),
            plan: SubscriptionPlan::Month,
        };
        assert!(sub.is_active_on(day(2026, 10, 1)));
        assert!(sub.is_active_on(day(2026, 10, 16)));
        assert!(!sub.is_active_on(day(2026, 10, 17)));
        assert_eq!(sub.days_left(day(2026, 10, 6)), 10);
    }
}
