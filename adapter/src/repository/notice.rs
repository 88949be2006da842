use crate::database::{model::notice::NoticeRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::NoticeId,
    notice::{event::CreateNotice, Notice, NoticeAudience},
};
use kernel::repository::notice::NoticeRepository;
use shared::error::{AppError, AppResult};
use sqlx::PgConnection;

/// Appends to the notice log on the caller's connection, so the notice
/// commits or rolls back with the operation it reports.
pub(crate) async fn insert_notice(
    conn: &mut PgConnection,
    notice: CreateNotice,
) -> AppResult<NoticeId> {
    let notice_id = NoticeId::new();
    let res = sqlx::query(
        r#"
            INSERT INTO notices (notice_id, title, text, sender, recipient)
            VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(notice_id)
    .bind(&notice.title)
    .bind(&notice.text)
    .bind(&notice.sender)
    .bind(notice.recipient.as_str())
    .execute(conn)
    .await
    .map_err(AppError::SpecificOperationError)?;

    if res.rows_affected() < 1 {
        return Err(AppError::NoRowsAffectedError(
            "No notice record has been created".into(),
        ));
    }
    Ok(notice_id)
}

#[derive(new)]
pub struct NoticeRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl NoticeRepository for NoticeRepositoryImpl {
    async fn find_visible(&self, audience: &NoticeAudience, limit: i64) -> AppResult<Vec<Notice>> {
        let rows: Vec<NoticeRow> = match audience {
            NoticeAudience::Everything => {
                sqlx::query_as(
                    r#"
                        SELECT notice_id, title, text, sender, recipient, created_at
                        FROM notices
                        ORDER BY created_at DESC
                        LIMIT $1
                    "#,
                )
                .bind(limit)
                .fetch_all(self.db.inner_ref())
                .await
            }
            NoticeAudience::Addressed(recipients) => {
                sqlx::query_as(
                    r#"
                        SELECT notice_id, title, text, sender, recipient, created_at
                        FROM notices
                        WHERE recipient = ANY($1)
                        ORDER BY created_at DESC
                        LIMIT $2
                    "#,
                )
                .bind(recipients.as_slice())
                .bind(limit)
                .fetch_all(self.db.inner_ref())
                .await
            }
        }
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Notice::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::{
        notice::{Recipient, SYSTEM_SENDER},
        role::Role,
    };

    async fn post(pool: &sqlx::PgPool, title: &str, recipient: Recipient) {
        let mut conn = pool.acquire().await.unwrap();
        insert_notice(
            &mut conn,
            CreateNotice::new(title.into(), None, SYSTEM_SENDER.into(), recipient),
        )
        .await
        .unwrap();
    }

    #[sqlx::test]
    async fn students_only_see_what_is_addressed_to_them(pool: sqlx::PgPool) {
        post(&pool, "for everyone", Recipient::Everyone).await;
        post(&pool, "for admins", Recipient::Admins).await;
        post(&pool, "for ivanov", Recipient::Login("ivanov".into())).await;
        post(&pool, "for petrov", Recipient::Login("petrov".into())).await;
        post(&pool, "for students", Recipient::Students).await;

        let repo = NoticeRepositoryImpl::new(ConnectionPool::new(pool));

        let seen = repo
            .find_visible(&NoticeAudience::for_user("ivanov", Role::Student), 200)
            .await
            .unwrap();
        let mut titles: Vec<_> = seen.iter().map(|n| n.title.as_str()).collect();
        titles.sort();
        assert_eq!(titles, vec!["for everyone", "for ivanov", "for students"]);

        let all = repo
            .find_visible(&NoticeAudience::for_user("admin", Role::Admin), 200)
            .await
            .unwrap();
        assert_eq!(all.len(), 5);

        let capped = repo.find_visible(&NoticeAudience::Everything, 2).await.unwrap();
        assert_eq!(capped.len(), 2);
    }
}
