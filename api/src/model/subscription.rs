use super::form::text;
use chrono::NaiveDate;
use kernel::model::{
    accounting::{
        event::BuySubscription,
        subscription::{Subscription, SubscriptionPlan},
        FundingSource,
    },
    id::UserId,
};
use serde::{Deserialize, Serialize};
use shared::error::AppResult;
use strum::IntoEnumIterator;

#[derive(Deserialize)]
pub struct BuySubscriptionRequest {
    #[serde(default, deserialize_with = "text")]
    pub plan: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub pay_from: Option<String>,
}

impl BuySubscriptionRequest {
    pub fn into_event(self, student_id: UserId, today: NaiveDate) -> AppResult<BuySubscription> {
        Ok(BuySubscription::new(
            student_id,
            SubscriptionPlan::from_form(self.plan.as_deref()),
            FundingSource::from_form(self.pay_from.as_deref())?,
            today,
        ))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub plan: SubscriptionPlan,
    pub cost: i64,
    pub duration_days: u64,
}

impl From<SubscriptionPlan> for PlanResponse {
    fn from(plan: SubscriptionPlan) -> Self {
        Self {
            plan,
            cost: plan.cost(),
            duration_days: plan.duration_days(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSubscriptionResponse {
    pub plan: SubscriptionPlan,
    pub start_date: NaiveDate,
    pub until: NaiveDate,
    pub days_left: i64,
}

impl ActiveSubscriptionResponse {
    pub fn new(subscription: Subscription, today: NaiveDate) -> Self {
        Self {
            plan: subscription.plan,
            start_date: subscription.start_date,
            until: subscription.until_date,
            days_left: subscription.days_left(today),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionsResponse {
    pub student_id: UserId,
    pub active_subscription: Option<ActiveSubscriptionResponse>,
    pub plans: Vec<PlanResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubscriptionsResponse {
    pub fn new(
        student_id: UserId,
        active: Option<Subscription>,
        today: NaiveDate,
        message: Option<String>,
    ) -> Self {
        Self {
            student_id,
            active_subscription: active.map(|s| ActiveSubscriptionResponse::new(s, today)),
            plans: SubscriptionPlan::iter().map(PlanResponse::from).collect(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_plans_buy_a_month_and_unknown_sources_fail() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let req: BuySubscriptionRequest =
            serde_urlencoded::from_str("plan=fortnight&pay_from=card").unwrap();
        let event = req.into_event(UserId::new(), today).unwrap();
        assert_eq!(event.plan, SubscriptionPlan::Month);
        assert_eq!(event.pay_from, FundingSource::Card);

        let req: BuySubscriptionRequest = serde_urlencoded::from_str("pay_from=barter").unwrap();
        assert!(req.into_event(UserId::new(), today).is_err());
    }

    #[test]
    fn plan_table_lists_every_plan() {
        let page = SubscriptionsResponse::new(
            UserId::new(),
            None,
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            None,
        );
        assert_eq!(page.plans.len(), 3);
        assert_eq!(page.plans[2].cost, 18000);
    }
}
