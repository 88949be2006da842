use crate::database::{model::report::ReportRow, ConnectionPool};
use crate::repository::notice::insert_notice;
use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::model::{
    id::ReportId,
    notice::{event::CreateNotice, Recipient},
    report::{report_filename, report_title, CreateReport, Report, ReportSnapshot},
};
use kernel::repository::report::{ReportRepository, ReportStorage};
use shared::error::{AppError, AppResult};
use sqlx::{
    types::chrono::{DateTime, Utc},
    PgConnection,
};
use std::sync::Arc;

#[derive(new)]
pub struct ReportRepositoryImpl {
    db: ConnectionPool,
    storage: Arc<dyn ReportStorage>,
}

#[async_trait]
impl ReportRepository for ReportRepositoryImpl {
    async fn create(&self, event: CreateReport) -> AppResult<Report> {
        let mut tx = self.db.begin().await?;

        let number: i64 =
            sqlx::query_scalar("SELECT nextval(pg_get_serial_sequence('reports', 'number'))")
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let title = report_title(number, event.today);
        let filename = report_filename(number);

        let snapshot = take_snapshot(&mut tx, event.today).await?;
        let contents = snapshot.render(event.generated_at, &event.creator_name);

        let report_id = ReportId::new();
        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
                INSERT INTO reports (report_id, number, title, filename, created_by)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING created_at
            "#,
        )
        .bind(report_id)
        .bind(number)
        .bind(&title)
        .bind(&filename)
        .bind(event.created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        insert_notice(
            &mut tx,
            CreateNotice::new(
                "Report generated".into(),
                Some(title.clone()),
                event.creator_name,
                Recipient::Admins,
            ),
        )
        .await?;

        // the index row is only committed once the document exists
        self.storage.save(&filename, &contents).await?;
        if let Err(e) = tx.commit().await {
            if let Err(cleanup) = self.storage.remove(&filename).await {
                tracing::warn!(error.message = %cleanup, %filename, "orphaned report file");
            }
            return Err(AppError::TransactionError(e));
        }

        tracing::info!(%report_id, number, "report generated");

        Ok(Report {
            id: report_id,
            number,
            title,
            filename,
            created_by: Some(event.created_by),
            created_at,
        })
    }

    async fn find_all(&self, limit: i64) -> AppResult<Vec<Report>> {
        let rows: Vec<ReportRow> = sqlx::query_as(
            r#"
                SELECT report_id, number, title, filename, created_by, created_at
                FROM reports
                ORDER BY number DESC
                LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Report::from).collect())
    }

    async fn find_by_id(&self, report_id: ReportId) -> AppResult<Option<Report>> {
        let row: Option<ReportRow> = sqlx::query_as(
            r#"
                SELECT report_id, number, title, filename, created_by, created_at
                FROM reports
                WHERE report_id = $1
            "#,
        )
        .bind(report_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Report::from))
    }

    async fn read_contents(&self, report: &Report) -> AppResult<Vec<u8>> {
        self.storage.load(&report.filename).await
    }
}

async fn take_snapshot(conn: &mut PgConnection, today: NaiveDate) -> AppResult<ReportSnapshot> {
    let (menu_items_today, new_orders, served_today, written_off_today, procurement_entries): (
        i64,
        i64,
        i64,
        i64,
        i64,
    ) = sqlx::query_as(
        r#"
            SELECT
                (SELECT COUNT(*) FROM menu_items WHERE menu_date = $1),
                (SELECT COUNT(*) FROM orders WHERE status = 'new'),
                (SELECT COALESCE(SUM(count), 0)::BIGINT FROM serves WHERE served_on = $1),
                (SELECT COALESCE(SUM(count), 0)::BIGINT FROM write_offs WHERE written_off_on = $1),
                (SELECT COUNT(*) FROM procurement)
        "#,
    )
    .bind(today)
    .fetch_one(conn)
    .await
    .map_err(AppError::SpecificOperationError)?;

    Ok(ReportSnapshot {
        menu_items_today,
        new_orders,
        served_today,
        written_off_today,
        procurement_entries,
    })
}
