use super::form::{lenient_i32, lenient_i64, text};
use chrono::NaiveDate;
use kernel::model::{
    id::MenuItemId,
    menu::{event::CreateMenuItem, MealType, MenuItem, StockLine},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

#[derive(Deserialize)]
pub struct CreateMenuItemRequest {
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub meal_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub kcal: Option<i32>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub portions: Option<i32>,
    #[serde(default, deserialize_with = "text")]
    pub allergens: Option<String>,
}

impl CreateMenuItemRequest {
    pub fn into_event(self, menu_date: NaiveDate) -> AppResult<CreateMenuItem> {
        let name = self
            .name
            .ok_or_else(|| AppError::UnprocessableEntity("the dish name is required".into()))?;
        let meal_type = MealType::from_form(self.meal_type.as_deref())?;
        Ok(CreateMenuItem::new(
            menu_date,
            name,
            meal_type,
            self.price.unwrap_or(0),
            self.kcal.unwrap_or(0),
            self.allergens,
            self.portions.unwrap_or(0),
        )
        .clamped())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemResponse {
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

impl From<MenuItem> for MenuItemResponse {
    fn from(value: MenuItem) -> Self {
        let MenuItem {
            id,
            menu_date,
            name,
            meal_type,
            price,
            kcal,
            allergens,
            portions_total,
            portions_available,
        } = value;
        Self {
            id,
            menu_date,
            name,
            meal_type,
            price,
            kcal,
            allergens,
            portions_total,
            portions_available,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub date: NaiveDate,
    pub items: Vec<MenuItemResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MenuResponse {
    pub fn new(date: NaiveDate, items: Vec<MenuItem>) -> Self {
        Self {
            date,
            items: items.into_iter().map(MenuItemResponse::from).collect(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuHistoryResponse {
    pub items: Vec<MenuItemResponse>,
}

impl From<Vec<MenuItem>> for MenuHistoryResponse {
    fn from(value: Vec<MenuItem>) -> Self {
        Self {
            items: value.into_iter().map(MenuItemResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLineResponse {
    pub name: String,
    pub available: i64,
    pub served: i64,
    pub written_off: i64,
}

impl From<StockLine> for StockLineResponse {
    fn from(value: StockLine) -> Self {
        let StockLine {
            name,
            available,
            served,
            written_off,
        } = value;
        Self {
            name,
            available,
            served,
            written_off,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub date: NaiveDate,
    pub stock: Vec<StockLineResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn menu_form_clamps_negatives_and_defaults_to_lunch() {
        let req: CreateMenuItemRequest =
            serde_urlencoded::from_str("name=Tea&price=-5&kcal=abc&portions=-1").unwrap();
        let item = req.into_event(day()).unwrap();
        assert_eq!(item.meal_type, MealType::Lunch);
        assert_eq!((item.price, item.kcal, item.portions), (0, 0, 0));
    }

    #[test]
    fn menu_form_needs_a_name_and_a_known_meal_type() {
        let req: CreateMenuItemRequest = serde_urlencoded::from_str("name=+&price=10").unwrap();
        assert!(req.into_event(day()).is_err());

        let req: CreateMenuItemRequest =
            serde_urlencoded::from_str("name=Tea&meal_type=dinner").unwrap();
        assert!(req.into_event(day()).is_err());
    }
}
