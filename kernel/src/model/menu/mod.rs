use crate::model::id::MenuItemId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub mod event;

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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MealType {
    Breakfast,
    #[default]
    Lunch,
    Snack,
}

impl MealType {
    /// Missing values fall back to lunch, unknown ones are rejected.
    pub fn from_form(value: Option<&str>) -> AppResult<Self> {
        match value {
            None => Ok(Self::default()),
            Some(v) => v
                .parse()
                .map_err(|_| AppError::UnprocessableEntity(format!("unknown meal type: {v}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub menu_date: NaiveDate,
    pub name: String,
    pub meal_type: MealType,
    pub price: i64,
    pub kcal: i32,
    pub allergens: Option<String>,
    pub portions_total: i32,
    pub portions_available: i32,
}

/// Per-dish stock figures for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLine {
    pub name: String,
    pub available: i64,
    pub served: i64,
    pub written_off: i64,
}

/// The set a day starts with when nobody has published a menu for it.
pub fn default_menu(menu_date: NaiveDate) -> Vec<event::CreateMenuItem> {
    [
        ("Oatmeal porridge", MealType::Breakfast, 80, 250, Some("milk"), 30),
        ("Chicken soup", MealType::Lunch, 120, 300, None, 40),
        ("Cutlet with buckwheat", MealType::Lunch, 180, 520, Some("gluten"), 35),
        ("Compote", MealType::Lunch, 40, 120, None, 50),
        ("Bun", MealType::Snack, 60, 280, Some("gluten"), 25),
    ]
    .into_iter()
    .map(|(name, meal_type, price, kcal, allergens, portions)| {
        event::CreateMenuItem::new(
            menu_date,
            name.to_string(),
            meal_type,
            price,
            kcal,
            allergens.map(str::to_string),
            portions,
        )
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_type_defaults_to_lunch_only_when_absent() {
        assert_eq!(MealType::from_form(None).unwrap(), MealType::Lunch);
        assert_eq!(
            MealType::from_form(Some("breakfast")).unwrap(),
            MealType::Breakfast
        );
        assert!(MealType::from_form(Some("dinner")).is_err());
    }

    #[test]
    fn default_menu_is_fully_stocked_for_the_day() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let items = default_menu(day);
        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|i| i.menu_date == day && i.portions > 0));
    }
}
