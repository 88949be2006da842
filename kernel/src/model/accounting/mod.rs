//! Balance, portion and subscription accounting.
//!
//! The functions here decide whether a serve, write-off, top-up or
//! subscription purchase may happen and what it costs. They do not touch
//! storage; the repository applies their verdict inside one database
//! transaction together with the ledger, serve and notice rows.

use crate::model::{
    id::{MenuItemId, ServeId, TransactionId, UserId, WriteOffId},
    menu::MealType,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumString};

pub mod event;
pub mod subscription;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PayType {
    #[default]
    Balance,
    Subscription,
    Free,
}

impl PayType {
    pub fn from_form(value: Option<&str>) -> AppResult<Self> {
        match value {
            None => Ok(Self::default()),
            Some(v) => v
                .parse()
                .map_err(|_| AppError::UnprocessableEntity(format!("invalid payment type: {v}"))),
        }
    }
}

/// Where the money for a subscription comes from. Only `Balance` touches
/// the ledger; cash and card are settled at the counter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FundingSource {
    #[default]
    Balance,
    Cash,
    Card,
}

impl FundingSource {
    pub fn from_form(value: Option<&str>) -> AppResult<Self> {
        match value {
            None => Ok(Self::default()),
            Some(v) => v
                .parse()
                .map_err(|_| AppError::UnprocessableEntity(format!("invalid payment source: {v}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransactionKind {
    TopUp,
    Charge,
}

/// Ledger row. Top-ups are positive, charges negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: TransactionId,
    pub student_id: UserId,
    pub kind: TransactionKind,
    pub amount: i64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Serve {
    pub id: ServeId,
    pub student_id: UserId,
    pub student_name: String,
    pub menu_item_id: MenuItemId,
    pub item_name: String,
    pub meal_type: MealType,
    pub count: i32,
    pub pay_type: PayType,
    pub amount: i64,
    pub comment: Option<String>,
    pub staff_id: Option<UserId>,
    pub served_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOff {
    pub id: WriteOffId,
    pub menu_item_id: MenuItemId,
    pub item_name: String,
    pub count: i32,
    pub reason: String,
    pub comment: Option<String>,
    pub staff_id: Option<UserId>,
    pub staff_name: Option<String>,
    pub written_off_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Portions can only leave the kitchen in positive amounts that are in stock.
pub fn ensure_portions(available: i32, count: i32) -> AppResult<()> {
    if count <= 0 {
        return Err(AppError::UnprocessableEntity(
            "the number of portions must be positive".into(),
        ));
    }
    if available < count {
        return Err(AppError::InsufficientPortions { available });
    }
    Ok(())
}

/// Amount to charge for `count` portions at `unit_price`, or the reason the
/// student cannot be served with this payment type.
pub fn settle(
    pay_type: PayType,
    unit_price: i64,
    count: i32,
    balance: i64,
    has_active_subscription: bool,
) -> AppResult<i64> {
    match pay_type {
        PayType::Balance => {
            let required = unit_price
                .checked_mul(i64::from(count))
                .ok_or_else(|| AppError::UnprocessableEntity("amount is too large".into()))?;
            if balance < required {
                return Err(AppError::InsufficientFunds {
                    required,
                    available: balance,
                });
            }
            Ok(required)
        }
        // subscriptions are unmetered while active
        PayType::Subscription if has_active_subscription => Ok(0),
        PayType::Subscription => Err(AppError::NoActiveSubscription),
        PayType::Free => Ok(0),
    }
}

pub fn ensure_top_up_amount(amount: i64) -> AppResult<()> {
    if amount <= 0 {
        return Err(AppError::UnprocessableEntity(
            "top-up amount must be positive".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_serve_charges_price_times_count() {
        assert_eq!(settle(PayType::Balance, 120, 1, 500, false).unwrap(), 120);
        assert_eq!(settle(PayType::Balance, 120, 3, 360, false).unwrap(), 360);
    }

    #[test]
    fn balance_serve_never_overdraws() {
        let err = settle(PayType::Balance, 120, 3, 359, false).unwrap_err();
        assert!(matches!(
            err,
            AppError::InsufficientFunds {
                required: 360,
                available: 359
            }
        ));
    }

    #[test]
    fn balance_is_checked_even_with_a_subscription() {
        assert!(settle(PayType::Balance, 50, 1, 0, true).is_err());
    }

    #[test]
    fn subscription_serve_requires_an_active_subscription() {
        assert_eq!(settle(PayType::Subscription, 120, 2, 0, true).unwrap(), 0);
        assert!(matches!(
            settle(PayType::Subscription, 120, 2, 1000, false),
            Err(AppError::NoActiveSubscription)
        ));
    }

    #[test]
    fn free_serve_costs_nothing() {
        assert_eq!(settle(PayType::Free, 180, 4, 0, false).unwrap(), 0);
    }

    #[test]
    fn overflowing_amounts_are_rejected() {
        assert!(settle(PayType::Balance, i64::MAX, 2, i64::MAX, false).is_err());
    }

    #[test]
    fn portions_must_be_positive_and_in_stock() {
        assert!(ensure_portions(5, 5).is_ok());
        assert!(matches!(
            ensure_portions(4, 5),
            Err(AppError::InsufficientPortions { available: 4 })
        ));
        assert!(ensure_portions(5, 0).is_err());
        assert!(ensure_portions(5, -1).is_err());
    }

    #[test]
    fn any_sequence_of_checked_takes_keeps_stock_non_negative() {
        let mut available = 7;
        for count in [3, 5, 2, 4, 1, 1, 9] {
            if ensure_portions(available, count).is_ok() {
                available -= count;
            }
            assert!(available >= 0);
        }
        assert_eq!(available, 0);
    }

    #[test]
    fn top_up_must_be_positive() {
        assert!(ensure_top_up_amount(-5).is_err());
        assert!(ensure_top_up_amount(0).is_err());
        assert!(ensure_top_up_amount(100).is_ok());
    }

    #[test]
    fn unknown_pay_types_are_rejected_at_the_boundary() {
        assert_eq!(PayType::from_form(None).unwrap(), PayType::Balance);
        assert_eq!(
            PayType::from_form(Some("subscription")).unwrap(),
            PayType::Subscription
        );
        assert!(PayType::from_form(Some("credit")).is_err());
        assert_eq!(FundingSource::from_form(Some("cash")).unwrap(), FundingSource::Cash);
        assert!(FundingSource::from_form(Some("iou")).is_err());
    }
}
