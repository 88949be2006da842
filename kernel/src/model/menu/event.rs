use super::MealType;
use chrono::NaiveDate;
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateMenuItem {
    pub menu_date: NaiveDate,
    pub name: String,
    pub meal_type: MealType,
    pub price: i64,
    pub kcal: i32,
    pub allergens: Option<String>,
    // becomes both portions_total and portions_available
    pub portions: i32,
}

impl CreateMenuItem {
    /// Negative numbers submitted through the menu form are treated as zero.
    pub fn clamped(mut self) -> Self {
        self.price = self.price.max(0);
        self.kcal = self.kcal.max(0);
        self.portions = self.portions.max(0);
        self
    }
}

#[derive(Debug, new)]
pub struct PublishMenuItem {
    pub item: CreateMenuItem,
    pub published_by: String,
}
