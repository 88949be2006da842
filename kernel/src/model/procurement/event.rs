use crate::model::id::UserId;
use derive_new::new;
use shared::error::{AppError, AppResult};

#[derive(Debug, new)]
pub struct CreateProcurement {
    pub name: String,
    pub category: String,
    pub count: i32,
    pub price: i64,
    pub supplier: String,
    pub staff_id: UserId,
    pub staff_name: String,
}

impl CreateProcurement {
    pub fn validate(&self) -> AppResult<()> {
        let blank = [&self.name, &self.category, &self.supplier]
            .iter()
            .any(|s| s.trim().is_empty());
        if blank || self.count <= 0 || self.price <= 0 {
            return Err(AppError::UnprocessableEntity(
                "invalid procurement data".into(),
            ));
        }
        Ok(())
    }
}
