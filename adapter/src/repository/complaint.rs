use crate::database::{model::complaint::ComplaintRow, ConnectionPool};
use crate::repository::notice::insert_notice;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    complaint::{
        event::{AnswerComplaint, CreateComplaint},
        Complaint, ComplaintScope, ComplaintStatus,
    },
    id::ComplaintId,
    notice::{event::CreateNotice, Recipient},
};
use kernel::repository::complaint::ComplaintRepository;
use shared::error::{AppError, AppResult};
use sqlx::types::chrono::{DateTime, Utc};

#[derive(new)]
pub struct ComplaintRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ComplaintRepository for ComplaintRepositoryImpl {
    async fn create(&self, event: CreateComplaint) -> AppResult<Complaint> {
        let text = event.text.trim().to_string();
        if text.is_empty() {
            return Err(AppError::UnprocessableEntity(
                "the complaint text is required".into(),
            ));
        }

        let mut tx = self.db.begin().await?;

        let complaint_id = ComplaintId::new();
        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
                INSERT INTO complaints
                (complaint_id, student_id, student_name, meal_date, meal_type, item,
                 rating, text, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING created_at
            "#,
        )
        .bind(complaint_id)
        .bind(event.student_id)
        .bind(&event.student_name)
        .bind(event.meal_date)
        .bind(event.meal_type.map(|m| m.to_string()))
        .bind(&event.item)
        .bind(event.rating.map(|r| r.value()))
        .bind(&text)
        .bind(ComplaintStatus::New.as_ref())
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        insert_notice(
            &mut tx,
            CreateNotice::new(
                "Complaint".into(),
                Some(format!("{} sent a complaint about a meal", event.student_name)),
                event.student_name.clone(),
                Recipient::Admins,
            ),
        )
        .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(Complaint {
            id: complaint_id,
            student_id: event.student_id,
            student_name: event.student_name,
            meal_date: event.meal_date,
            meal_type: event.meal_type,
            item: event.item,
            rating: event.rating,
            text,
            status: ComplaintStatus::New,
            answer: None,
            answered_at: None,
            staff_id: None,
            created_at,
        })
    }

    async fn answer(&self, event: AnswerComplaint) -> AppResult<Complaint> {
        let mut tx = self.db.begin().await?;

        let row: Option<ComplaintRow> = sqlx::query_as(
            r#"
                SELECT complaint_id, student_id, student_name, meal_date, meal_type, item,
                       rating, text, status, answer, answered_at, staff_id, created_at
                FROM complaints
                WHERE complaint_id = $1
                FOR UPDATE
            "#,
        )
        .bind(event.complaint_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::EntityNotFound(format!(
                "complaint ({}) was not found",
                event.complaint_id
            )));
        };
        let mut complaint = Complaint::try_from(row)?;
        complaint.status = complaint.status.transition(event.status)?;
        complaint.answer = event
            .answer
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        complaint.staff_id = Some(event.staff_id);

        let answered_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
                UPDATE complaints
                SET status = $2, answer = $3, staff_id = $4, answered_at = CURRENT_TIMESTAMP(3)
                WHERE complaint_id = $1
                RETURNING answered_at
            "#,
        )
        .bind(complaint.id)
        .bind(complaint.status.as_ref())
        .bind(&complaint.answer)
        .bind(event.staff_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        complaint.answered_at = Some(answered_at);

        let login: String = sqlx::query_scalar("SELECT login FROM users WHERE user_id = $1")
            .bind(complaint.student_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        insert_notice(
            &mut tx,
            CreateNotice::new(
                "Complaint answered".into(),
                Some("Your complaint has been answered (see the Complaints page).".into()),
                event.staff_name,
                Recipient::Login(login),
            ),
        )
        .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(complaint_id = %complaint.id, status = %complaint.status, "complaint answered");
        Ok(complaint)
    }

    async fn find(&self, scope: ComplaintScope, limit: i64) -> AppResult<Vec<Complaint>> {
        let base = r#"
            SELECT complaint_id, student_id, student_name, meal_date, meal_type, item,
                   rating, text, status, answer, answered_at, staff_id, created_at
            FROM complaints
        "#;
        let rows: Vec<ComplaintRow> = match scope {
            ComplaintScope::Mine(student_id) => {
                sqlx::query_as(&format!(
                    "{base} WHERE student_id = $1 ORDER BY created_at DESC LIMIT $2"
                ))
                .bind(student_id)
                .bind(limit)
                .fetch_all(self.db.inner_ref())
                .await
            }
            ComplaintScope::Open => {
                sqlx::query_as(&format!(
                    "{base} WHERE status IN ('new', 'in_review') ORDER BY created_at DESC LIMIT $1"
                ))
                .bind(limit)
                .fetch_all(self.db.inner_ref())
                .await
            }
            ComplaintScope::All => {
                sqlx::query_as(&format!("{base} ORDER BY created_at DESC LIMIT $1"))
                    .bind(limit)
                    .fetch_all(self.db.inner_ref())
                    .await
            }
        }
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Complaint::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::user::UserRepositoryImpl;
    use kernel::model::{complaint::Rating, role::Role, user::event::CreateUser};
    use kernel::repository::user::UserRepository;

    #[sqlx::test]
    async fn answered_complaints_leave_the_open_queue(pool: sqlx::PgPool) {
        let db = ConnectionPool::new(pool);
        let users = UserRepositoryImpl::new(db.clone());
        let student = users
            .register(CreateUser::new(
                "ivanov".into(),
                "pw".into(),
                "Ivan".into(),
                "7B".into(),
                Role::Student,
                None,
                None,
                0,
            ))
            .await
            .unwrap();
        let repo = ComplaintRepositoryImpl::new(db);

        let complaint = repo
            .create(CreateComplaint::new(
                student.id,
                student.name.clone(),
                None,
                None,
                Some("Soup".into()),
                Rating::accept(Some(9)),
                "Too salty".into(),
            ))
            .await
            .unwrap();
        assert_eq!(complaint.rating, None);
        assert_eq!(repo.find(ComplaintScope::Open, 300).await.unwrap().len(), 1);

        let staff = users
            .register(CreateUser::new(
                "cook".into(),
                "pw".into(),
                "Cook".into(),
                "Canteen".into(),
                Role::Cook,
                None,
                None,
                0,
            ))
            .await
            .unwrap();
        let answered = repo
            .answer(AnswerComplaint::new(
                complaint.id,
                ComplaintStatus::Resolved,
                Some("Recipe adjusted".into()),
                staff.id,
                staff.name,
            ))
            .await
            .unwrap();
        assert_eq!(answered.status, ComplaintStatus::Resolved);
        assert!(answered.answered_at.is_some());

        assert!(repo.find(ComplaintScope::Open, 300).await.unwrap().is_empty());
        assert_eq!(repo.find(ComplaintScope::All, 300).await.unwrap().len(), 1);
        assert_eq!(
            repo.find(ComplaintScope::Mine(student.id), 300)
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
