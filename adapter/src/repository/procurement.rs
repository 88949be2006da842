use crate::database::{model::procurement::ProcurementRow, ConnectionPool};
use crate::repository::notice::insert_notice;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::ProcurementId,
    notice::{event::CreateNotice, Recipient},
    procurement::{event::CreateProcurement, ProcurementEntry},
};
use kernel::repository::procurement::ProcurementRepository;
use shared::error::{AppError, AppResult};
use sqlx::types::chrono::{DateTime, Utc};

#[derive(new)]
pub struct ProcurementRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ProcurementRepository for ProcurementRepositoryImpl {
    async fn create(&self, event: CreateProcurement) -> AppResult<ProcurementEntry> {
        event.validate()?;
        let name = event.name.trim().to_string();
        let category = event.category.trim().to_string();
        let supplier = event.supplier.trim().to_string();

        let mut tx = self.db.begin().await?;

        let procurement_id = ProcurementId::new();
        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
                INSERT INTO procurement
                (procurement_id, name, category, count, price, supplier, staff_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING created_at
            "#,
        )
        .bind(procurement_id)
        .bind(&name)
        .bind(&category)
        .bind(event.count)
        .bind(event.price)
        .bind(&supplier)
        .bind(event.staff_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        insert_notice(
            &mut tx,
            CreateNotice::new(
                "Procurement".into(),
                Some(format!(
                    "Added: {name} ({category}) x{} at {} from {supplier}",
                    event.count, event.price
                )),
                event.staff_name,
                Recipient::Admins,
            ),
        )
        .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(ProcurementEntry {
            id: procurement_id,
            name,
            category,
            count: event.count,
            price: event.price,
            supplier,
            staff_id: Some(event.staff_id),
            created_at,
        })
    }

    async fn find_recent(&self, limit: i64) -> AppResult<Vec<ProcurementEntry>> {
        let rows: Vec<ProcurementRow> = sqlx::query_as(
            r#"
                SELECT procurement_id, name, category, count, price, supplier, staff_id, created_at
                FROM procurement
                ORDER BY created_at DESC
                LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(ProcurementEntry::from).collect())
    }
}
