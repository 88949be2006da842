use super::parse_column;
use kernel::model::{
    id::MenuItemId,
    menu::{MenuItem, StockLine},
};
use shared::error::AppError;
use sqlx::{types::chrono::NaiveDate, FromRow};

#[derive(FromRow)]
pub struct MenuItemRow {
    pub menu_item_id: MenuItemId,
    pub menu_date: NaiveDate,
    pub name: String,
    pub meal_type: String,
    pub price: i64,
    pub kcal: i32,
    pub allergens: Option<String>,
    pub portions_total: i32,
    pub portions_available: i32,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = AppError;

    fn try_from(value: MenuItemRow) -> Result<Self, Self::Error> {
        let MenuItemRow {
            menu_item_id,
            menu_date,
            name,
            meal_type,
            price,
            kcal,
            allergens,
            portions_total,
            portions_available,
        } = value;
        Ok(MenuItem {
            id: menu_item_id,
            menu_date,
            name,
            meal_type: parse_column("meal type", &meal_type)?,
            price,
            kcal,
            allergens,
            portions_total,
            portions_available,
        })
    }
}

#[derive(FromRow)]
pub struct StockLineRow {
    pub name: String,
    pub available: i64,
    pub served: i64,
    pub written_off: i64,
}

impl From<StockLineRow> for StockLine {
    fn from(value: StockLineRow) -> Self {
        let StockLineRow {
            name,
            available,
            served,
            written_off,
        } = value;
        StockLine {
            name,
            available,
            served,
            written_off,
        }
    }
}
