use crate::database::{
    model::menu::{MenuItemRow, StockLineRow},
    ConnectionPool,
};
use crate::repository::notice::insert_notice;
use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::model::{
    id::MenuItemId,
    menu::{
        default_menu,
        event::{CreateMenuItem, PublishMenuItem},
        MenuItem, StockLine,
    },
    notice::{event::CreateNotice, Recipient},
};
use kernel::repository::menu::MenuRepository;
use shared::error::{AppError, AppResult};
use sqlx::PgConnection;

// Serializes concurrent seeding of the same day.
const MENU_SEED_LOCK: i64 = 0x6d65_6e75;

#[derive(new)]
pub struct MenuRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl MenuRepository for MenuRepositoryImpl {
    async fn seed_day_if_empty(&self, day: NaiveDate) -> AppResult<bool> {
        let mut tx = self.db.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(MENU_SEED_LOCK)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items WHERE menu_date = $1")
            .bind(day)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if existing > 0 {
            return Ok(false);
        }

        for item in default_menu(day) {
            insert_menu_item(&mut tx, &item).await?;
        }

        tx.commit().await.map_err(AppError::TransactionError)?;
        tracing::info!(%day, "default menu published");
        Ok(true)
    }

    async fn publish(&self, event: PublishMenuItem) -> AppResult<MenuItem> {
        let PublishMenuItem { item, published_by } = event;
        let item = item.clamped();
        if item.name.trim().is_empty() {
            return Err(AppError::UnprocessableEntity(
                "the dish name is required".into(),
            ));
        }

        let mut tx = self.db.begin().await?;
        let menu_item_id = insert_menu_item(&mut tx, &item).await?;

        insert_notice(
            &mut tx,
            CreateNotice::new(
                "Menu updated".into(),
                Some(format!(
                    "Added: {} ({}), portions: {}",
                    item.name, item.meal_type, item.portions
                )),
                published_by,
                Recipient::Admins,
            ),
        )
        .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(MenuItem {
            id: menu_item_id,
            menu_date: item.menu_date,
            name: item.name,
            meal_type: item.meal_type,
            price: item.price,
            kcal: item.kcal,
            allergens: item.allergens,
            portions_total: item.portions,
            portions_available: item.portions,
        })
    }

    async fn find_by_date(&self, day: NaiveDate) -> AppResult<Vec<MenuItem>> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
                SELECT menu_item_id, menu_date, name, meal_type, price, kcal,
                       allergens, portions_total, portions_available
                FROM menu_items
                WHERE menu_date = $1
                ORDER BY meal_type, name
            "#,
        )
        .bind(day)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(MenuItem::try_from).collect()
    }

    async fn find_history(&self, limit: i64) -> AppResult<Vec<MenuItem>> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
                SELECT menu_item_id, menu_date, name, meal_type, price, kcal,
                       allergens, portions_total, portions_available
                FROM menu_items
                ORDER BY menu_date DESC, meal_type, name
                LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(MenuItem::try_from).collect()
    }

    async fn find_by_id(&self, menu_item_id: MenuItemId) -> AppResult<Option<MenuItem>> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            r#"
                SELECT menu_item_id, menu_date, name, meal_type, price, kcal,
                       allergens, portions_total, portions_available
                FROM menu_items
                WHERE menu_item_id = $1
            "#,
        )
        .bind(menu_item_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(MenuItem::try_from).transpose()
    }

    async fn availability(&self, day: NaiveDate) -> AppResult<Vec<StockLine>> {
        // served and written-off figures are matched to menu lines by dish name
        let rows: Vec<StockLineRow> = sqlx::query_as(
            r#"
                SELECT m.name,
                       SUM(m.portions_available)::BIGINT AS available,
                       COALESCE((
                           SELECT SUM(s.count) FROM serves s
                           WHERE s.item_name = m.name AND s.served_on = $1
                       ), 0)::BIGINT AS served,
                       COALESCE((
                           SELECT SUM(w.count) FROM write_offs w
                           WHERE w.item_name = m.name AND w.written_off_on = $1
                       ), 0)::BIGINT AS written_off
                FROM menu_items m
                WHERE m.menu_date = $1
                GROUP BY m.name
                ORDER BY m.name
            "#,
        )
        .bind(day)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(StockLine::from).collect())
    }
}

async fn insert_menu_item(conn: &mut PgConnection, item: &CreateMenuItem) -> AppResult<MenuItemId> {
    let menu_item_id = MenuItemId::new();
    let res = sqlx::query(
        r#"
            INSERT INTO menu_items
            (menu_item_id, menu_date, name, meal_type, price, kcal, allergens,
             portions_total, portions_available)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        "#,
    )
    .bind(menu_item_id)
    .bind(item.menu_date)
    .bind(item.name.trim())
    .bind(item.meal_type.as_ref())
    .bind(item.price)
    .bind(item.kcal)
    .bind(&item.allergens)
    .bind(item.portions)
    .execute(conn)
    .await
    .map_err(AppError::SpecificOperationError)?;

    if res.rows_affected() < 1 {
        return Err(AppError::NoRowsAffectedError(
            "No menu item record has been created".into(),
        ));
    }
    Ok(menu_item_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::menu::MealType;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[sqlx::test]
    async fn a_day_is_seeded_only_while_empty(pool: sqlx::PgPool) {
        let repo = MenuRepositoryImpl::new(ConnectionPool::new(pool));

        assert!(repo.seed_day_if_empty(day()).await.unwrap());
        assert!(!repo.seed_day_if_empty(day()).await.unwrap());

        let items = repo.find_by_date(day()).await.unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].meal_type, MealType::Breakfast);
        assert!(items
            .iter()
            .all(|i| i.portions_available == i.portions_total));
    }

    #[sqlx::test]
    async fn negative_numbers_are_published_as_zero(pool: sqlx::PgPool) {
        let repo = MenuRepositoryImpl::new(ConnectionPool::new(pool));
        let item = CreateMenuItem::new(day(), "Tea".into(), MealType::Snack, -10, -1, None, -3);

        let published = repo
            .publish(PublishMenuItem::new(item, "Cook".into()))
            .await
            .unwrap();
        assert_eq!(published.price, 0);
        assert_eq!(published.portions_total, 0);

        let stored = repo.find_by_id(published.id).await.unwrap().unwrap();
        assert_eq!(stored, published);
        assert_eq!(repo.find_history(200).await.unwrap().len(), 1);
    }
}
