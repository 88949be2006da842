use crate::database::{model::user::UserRow, ConnectionPool};
use crate::repository::notice::insert_notice;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    notice::{event::CreateNotice, Recipient, SYSTEM_SENDER},
    user::{default_accounts, event::CreateUser, User},
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};
use sqlx::PgConnection;

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT user_id, login, name, work, role, benefit, allergy, balance
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn find_students(&self) -> AppResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
                SELECT user_id, login, name, work, role, benefit, allergy, balance
                FROM users
                WHERE role = 'student'
                ORDER BY name, login
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn register(&self, event: CreateUser) -> AppResult<User> {
        let mut tx = self.db.begin().await?;

        let user_id = insert_user(&mut tx, &event).await?.ok_or(AppError::LoginTaken)?;

        insert_notice(
            &mut tx,
            CreateNotice::new(
                "New user".into(),
                Some(format!("{} ({}), {}", event.name, event.role, event.work)),
                SYSTEM_SENDER.into(),
                Recipient::Admins,
            ),
        )
        .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(user_id = %user_id, login = %event.login, role = %event.role, "user registered");

        Ok(User {
            id: user_id,
            login: event.login,
            name: event.name,
            work: event.work,
            role: event.role,
            benefit: event.benefit,
            allergy: event.allergy,
            balance: event.initial_balance,
        })
    }

    async fn seed_defaults(&self) -> AppResult<usize> {
        let mut tx = self.db.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if existing > 0 {
            return Ok(0);
        }

        let mut created = 0;
        for account in default_accounts() {
            if insert_user(&mut tx, &account).await?.is_some() {
                created += 1;
            }
        }

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(created)
    }
}

// None when the login already exists.
async fn insert_user(conn: &mut PgConnection, event: &CreateUser) -> AppResult<Option<UserId>> {
    let password_hash = bcrypt::hash(&event.password, bcrypt::DEFAULT_COST)?;
    let user_id = UserId::new();
    let res = sqlx::query(
        r#"
            INSERT INTO users
            (user_id, login, password_hash, name, work, role, benefit, allergy, balance)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (login) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(&event.login)
    .bind(&password_hash)
    .bind(&event.name)
    .bind(&event.work)
    .bind(event.role.as_ref())
    .bind(&event.benefit)
    .bind(&event.allergy)
    .bind(event.initial_balance.max(0))
    .execute(conn)
    .await
    .map_err(AppError::SpecificOperationError)?;

    Ok((res.rows_affected() == 1).then_some(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::role::Role;

    fn student(login: &str) -> CreateUser {
        CreateUser::new(
            login.into(),
            "secret".into(),
            "Ivan Ivanov".into(),
            "7B".into(),
            Role::Student,
            None,
            Some("nuts".into()),
            0,
        )
    }

    #[sqlx::test]
    async fn duplicate_logins_are_rejected(pool: sqlx::PgPool) {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let user = repo.register(student("ivanov")).await.unwrap();
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.allergy.as_deref(), Some("nuts"));

        let err = repo.register(student("ivanov")).await.unwrap_err();
        assert!(matches!(err, AppError::LoginTaken));

        let notices: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notices WHERE recipient = 'admin'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(notices, 1);
    }

    #[sqlx::test]
    async fn defaults_are_seeded_once(pool: sqlx::PgPool) {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        assert_eq!(repo.seed_defaults().await.unwrap(), 3);
        assert_eq!(repo.seed_defaults().await.unwrap(), 0);

        let students = repo.find_students().await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].login, "student");
        assert_eq!(students[0].balance, 500);
    }
}
