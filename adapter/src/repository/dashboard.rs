use crate::database::ConnectionPool;
use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::model::dashboard::{DashboardStats, StockLevel};
use kernel::repository::dashboard::DashboardRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct DashboardRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl DashboardRepository for DashboardRepositoryImpl {
    async fn stats(&self, today: NaiveDate) -> AppResult<DashboardStats> {
        let (menu_today, served_today, written_off_today, orders_new, orders_approved): (
            i64,
            i64,
            i64,
            i64,
            i64,
        ) = sqlx::query_as(
            r#"
                SELECT
                    (SELECT COUNT(*) FROM menu_items WHERE menu_date = $1),
                    (SELECT COALESCE(SUM(count), 0)::BIGINT FROM serves WHERE served_on = $1),
                    (SELECT COALESCE(SUM(count), 0)::BIGINT FROM write_offs WHERE written_off_on = $1),
                    (SELECT COUNT(*) FROM orders WHERE status = 'new'),
                    (SELECT COUNT(*) FROM orders WHERE status = 'approved')
            "#,
        )
        .bind(today)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(DashboardStats {
            menu_today,
            served_today,
            written_off_today,
            orders_new,
            orders_approved,
        })
    }

    async fn top_stock(&self, today: NaiveDate, limit: i64) -> AppResult<Vec<StockLevel>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
                SELECT name, SUM(portions_available)::BIGINT AS available
                FROM menu_items
                WHERE menu_date = $1
                GROUP BY name
                ORDER BY available DESC, name
                LIMIT $2
            "#,
        )
        .bind(today)
        .bind(limit)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows
            .into_iter()
            .map(|(name, available)| StockLevel { name, available })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::menu::MenuRepositoryImpl;
    use kernel::repository::menu::MenuRepository;

    #[sqlx::test]
    async fn dashboard_counts_today_only(pool: sqlx::PgPool) {
        let db = ConnectionPool::new(pool);
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let menu = MenuRepositoryImpl::new(db.clone());
        menu.seed_day_if_empty(today).await.unwrap();
        menu.seed_day_if_empty(today.pred_opt().unwrap()).await.unwrap();

        let repo = DashboardRepositoryImpl::new(db);
        let stats = repo.stats(today).await.unwrap();
        assert_eq!(stats.menu_today, 5);
        assert_eq!(stats.served_today, 0);
        assert_eq!(stats.orders_new, 0);

        let top = repo.top_stock(today, 6).await.unwrap();
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].name, "Compote");
        assert_eq!(top[0].available, 50);
    }
}
