//! Balance, portion and subscription bookkeeping.
//!
//! Each operation runs in one transaction. The student row and the menu
//! item row are locked with `FOR UPDATE` before the rules in
//! `kernel::model::accounting` are evaluated, and the updates repeat the
//! guard in their `WHERE` clause, so concurrent requests queue up instead
//! of overdrawing a balance or driving portions below zero.

use crate::database::{
    model::{
        accounting::{
            ServeRow, StudentAccountRow, SubscriptionRow, TransactionRow, WriteOffRow,
        },
        menu::MenuItemRow,
        parse_column,
    },
    ConnectionPool,
};
use crate::repository::notice::insert_notice;
use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::model::{
    accounting::{
        ensure_portions, ensure_top_up_amount,
        event::{BuySubscription, ServeMeal, TopUp, WriteOffPortions},
        settle,
        subscription::Subscription,
        FundingSource, LedgerEntry, PayType, Serve, TransactionKind, WriteOff,
    },
    id::{MenuItemId, ServeId, SubscriptionId, TransactionId, UserId, WriteOffId},
    menu::MenuItem,
    notice::{event::CreateNotice, Recipient, SYSTEM_SENDER},
    role::Role,
};
use kernel::repository::accounting::AccountingRepository;
use shared::error::{AppError, AppResult};
use sqlx::{
    types::chrono::{DateTime, Utc},
    PgConnection,
};

#[derive(new)]
pub struct AccountingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AccountingRepository for AccountingRepositoryImpl {
    async fn serve(&self, event: ServeMeal) -> AppResult<Serve> {
        let mut tx = self.db.begin().await?;

        let student = lock_student(&mut tx, event.student_id).await?;
        let item = lock_menu_item(&mut tx, event.menu_item_id).await?;

        ensure_portions(item.portions_available, event.count)?;
        let has_active_subscription = match event.pay_type {
            PayType::Subscription => latest_until(&mut tx, event.student_id)
                .await?
                .is_some_and(|until| until >= event.today),
            _ => false,
        };
        let amount = settle(
            event.pay_type,
            item.price,
            event.count,
            student.balance,
            has_active_subscription,
        )?;

        take_portions(&mut tx, item.id, event.count).await?;
        // Balance serves always leave a charge in the ledger, even at price 0.
        if event.pay_type == PayType::Balance {
            if amount > 0 {
                debit(&mut tx, event.student_id, amount).await?;
            }
            insert_ledger_entry(
                &mut tx,
                event.student_id,
                TransactionKind::Charge,
                -amount,
                Some(format!("Meal: {} x{}", item.name, event.count)),
            )
            .await?;
        }

        let serve_id = ServeId::new();
        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
                INSERT INTO serves
                (serve_id, student_id, student_name, menu_item_id, item_name, meal_type,
                 count, pay_type, amount, comment, staff_id, served_on)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                RETURNING created_at
            "#,
        )
        .bind(serve_id)
        .bind(event.student_id)
        .bind(&student.name)
        .bind(item.id)
        .bind(&item.name)
        .bind(item.meal_type.as_ref())
        .bind(event.count)
        .bind(event.pay_type.as_ref())
        .bind(amount)
        .bind(&event.comment)
        .bind(event.staff_id)
        .bind(event.today)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        insert_notice(
            &mut tx,
            CreateNotice::new(
                "Meal served".into(),
                Some(format!("{} received {} x{}.", student.name, item.name, event.count)),
                event.staff_name.clone(),
                Recipient::Admins,
            ),
        )
        .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(
            student_id = %event.student_id,
            menu_item_id = %item.id,
            count = event.count,
            amount,
            pay_type = %event.pay_type,
            "meal served"
        );

        Ok(Serve {
            id: serve_id,
            student_id: event.student_id,
            student_name: student.name,
            menu_item_id: item.id,
            item_name: item.name,
            meal_type: item.meal_type,
            count: event.count,
            pay_type: event.pay_type,
            amount,
            comment: event.comment,
            staff_id: Some(event.staff_id),
            served_on: event.today,
            created_at,
        })
    }

    async fn write_off(&self, event: WriteOffPortions) -> AppResult<WriteOff> {
        let reason = event.reason.trim().to_string();
        if reason.is_empty() {
            return Err(AppError::UnprocessableEntity(
                "a reason is required to write off portions".into(),
            ));
        }

        let mut tx = self.db.begin().await?;

        let item = lock_menu_item(&mut tx, event.menu_item_id).await?;
        ensure_portions(item.portions_available, event.count)?;
        take_portions(&mut tx, item.id, event.count).await?;

        let write_off_id = WriteOffId::new();
        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
                INSERT INTO write_offs
                (write_off_id, menu_item_id, item_name, count, reason, comment,
                 staff_id, staff_name, written_off_on)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING created_at
            "#,
        )
        .bind(write_off_id)
        .bind(item.id)
        .bind(&item.name)
        .bind(event.count)
        .bind(&reason)
        .bind(&event.comment)
        .bind(event.staff_id)
        .bind(&event.staff_name)
        .bind(event.today)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        insert_notice(
            &mut tx,
            CreateNotice::new(
                "Write-off".into(),
                Some(format!(
                    "Written off {} x{}. Reason: {}",
                    item.name, event.count, reason
                )),
                event.staff_name.clone(),
                Recipient::Admins,
            ),
        )
        .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(
            menu_item_id = %item.id,
            count = event.count,
            reason = %reason,
            "portions written off"
        );

        Ok(WriteOff {
            id: write_off_id,
            menu_item_id: item.id,
            item_name: item.name,
            count: event.count,
            reason,
            comment: event.comment,
            staff_id: Some(event.staff_id),
            staff_name: Some(event.staff_name),
            written_off_on: event.today,
            created_at,
        })
    }

    async fn top_up(&self, event: TopUp) -> AppResult<LedgerEntry> {
        ensure_top_up_amount(event.amount)?;

        let mut tx = self.db.begin().await?;

        lock_student(&mut tx, event.student_id).await?;
        let res = sqlx::query(
            r#"
                UPDATE users
                SET balance = balance + $2
                WHERE user_id = $1
            "#,
        )
        .bind(event.student_id)
        .bind(event.amount)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No balance has been credited".into(),
            ));
        }

        let method = match event.method.trim() {
            "" => "cash",
            m => m,
        };
        let entry = insert_ledger_entry(
            &mut tx,
            event.student_id,
            TransactionKind::TopUp,
            event.amount,
            Some(format!("Top-up ({method})")),
        )
        .await?;

        insert_notice(
            &mut tx,
            CreateNotice::new(
                "Balance topped up".into(),
                Some(format!("+{} ({method})", event.amount)),
                SYSTEM_SENDER.into(),
                Recipient::Admins,
            ),
        )
        .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(
            student_id = %event.student_id,
            amount = event.amount,
            method,
            "balance topped up"
        );

        Ok(entry)
    }

    async fn buy_subscription(&self, event: BuySubscription) -> AppResult<Subscription> {
        let mut tx = self.db.begin().await?;

        let student = lock_student(&mut tx, event.student_id).await?;
        let cost = event.plan.cost();

        if event.pay_from == FundingSource::Balance {
            if student.balance < cost {
                return Err(AppError::InsufficientFunds {
                    required: cost,
                    available: student.balance,
                });
            }
            debit(&mut tx, event.student_id, cost).await?;
            insert_ledger_entry(
                &mut tx,
                event.student_id,
                TransactionKind::Charge,
                -cost,
                Some(format!("Subscription: {}", event.plan)),
            )
            .await?;
        }

        let latest = latest_until(&mut tx, event.student_id).await?;
        let (start_date, until_date) = event.plan.window(event.today, latest);

        let subscription_id = SubscriptionId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO subscriptions
                (subscription_id, student_id, start_date, until_date, plan)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(subscription_id)
        .bind(event.student_id)
        .bind(start_date)
        .bind(until_date)
        .bind(event.plan.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No subscription record has been created".into(),
            ));
        }

        insert_notice(
            &mut tx,
            CreateNotice::new(
                "Subscription purchased".into(),
                Some(format!(
                    "{}: plan {} until {} ({})",
                    student.name, event.plan, until_date, event.pay_from
                )),
                SYSTEM_SENDER.into(),
                Recipient::Admins,
            ),
        )
        .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(
            student_id = %event.student_id,
            plan = %event.plan,
            pay_from = %event.pay_from,
            %start_date,
            %until_date,
            "subscription purchased"
        );

        Ok(Subscription {
            id: subscription_id,
            student_id: event.student_id,
            start_date,
            until_date,
            plan: event.plan,
        })
    }

    async fn find_active_subscription(
        &self,
        student_id: UserId,
        today: NaiveDate,
    ) -> AppResult<Option<Subscription>> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
                SELECT subscription_id, student_id, start_date, until_date, plan
                FROM subscriptions
                WHERE student_id = $1
                ORDER BY until_date DESC
                LIMIT 1
            "#,
        )
        .bind(student_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let latest = row.map(Subscription::try_from).transpose()?;
        Ok(latest.filter(|s| s.is_active_on(today)))
    }

    async fn find_ledger(&self, student_id: UserId, limit: i64) -> AppResult<Vec<LedgerEntry>> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
                SELECT transaction_id, student_id, kind, amount, note, created_at
                FROM transactions
                WHERE student_id = $1
                ORDER BY created_at DESC
                LIMIT $2
            "#,
        )
        .bind(student_id)
        .bind(limit)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(LedgerEntry::try_from).collect()
    }

    async fn find_recent_serves(&self, limit: i64) -> AppResult<Vec<Serve>> {
        let rows: Vec<ServeRow> = sqlx::query_as(
            r#"
                SELECT serve_id, student_id, student_name, menu_item_id, item_name, meal_type,
                       count, pay_type, amount, comment, staff_id, served_on, created_at
                FROM serves
                ORDER BY created_at DESC
                LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Serve::try_from).collect()
    }

    async fn find_recent_write_offs(&self, limit: i64) -> AppResult<Vec<WriteOff>> {
        let rows: Vec<WriteOffRow> = sqlx::query_as(
            r#"
                SELECT write_off_id, menu_item_id, item_name, count, reason, comment,
                       staff_id, staff_name, written_off_on, created_at
                FROM write_offs
                ORDER BY created_at DESC
                LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(WriteOff::from).collect())
    }
}

// Locks the student's row until the transaction ends.
async fn lock_student(conn: &mut PgConnection, student_id: UserId) -> AppResult<StudentAccountRow> {
    let row: Option<StudentAccountRow> = sqlx::query_as(
        r#"
            SELECT name, login, role, balance
            FROM users
            WHERE user_id = $1
            FOR UPDATE
        "#,
    )
    .bind(student_id)
    .fetch_optional(conn)
    .await
    .map_err(AppError::SpecificOperationError)?;

    let Some(row) = row else {
        return Err(AppError::EntityNotFound(format!(
            "student ({student_id}) was not found"
        )));
    };
    if parse_column::<Role>("role", &row.role)? != Role::Student {
        return Err(AppError::UnprocessableEntity(format!(
            "{} is not a student",
            row.login
        )));
    }
    Ok(row)
}

async fn lock_menu_item(conn: &mut PgConnection, menu_item_id: MenuItemId) -> AppResult<MenuItem> {
    let row: Option<MenuItemRow> = sqlx::query_as(
        r#"
            SELECT menu_item_id, menu_date, name, meal_type, price, kcal,
                   allergens, portions_total, portions_available
            FROM menu_items
            WHERE menu_item_id = $1
            FOR UPDATE
        "#,
    )
    .bind(menu_item_id)
    .fetch_optional(conn)
    .await
    .map_err(AppError::SpecificOperationError)?;

    match row {
        Some(row) => MenuItem::try_from(row),
        None => Err(AppError::EntityNotFound(format!(
            "menu item ({menu_item_id}) was not found"
        ))),
    }
}

async fn latest_until(conn: &mut PgConnection, student_id: UserId) -> AppResult<Option<NaiveDate>> {
    sqlx::query_scalar("SELECT MAX(until_date) FROM subscriptions WHERE student_id = $1")
        .bind(student_id)
        .fetch_one(conn)
        .await
        .map_err(AppError::SpecificOperationError)
}

async fn take_portions(conn: &mut PgConnection, menu_item_id: MenuItemId, count: i32) -> AppResult<()> {
    let res = sqlx::query(
        r#"
            UPDATE menu_items
            SET portions_available = portions_available - $2
            WHERE menu_item_id = $1 AND portions_available >= $2
        "#,
    )
    .bind(menu_item_id)
    .bind(count)
    .execute(conn)
    .await
    .map_err(AppError::SpecificOperationError)?;

    if res.rows_affected() < 1 {
        return Err(AppError::NoRowsAffectedError(format!(
            "portions of menu item ({menu_item_id}) were not taken"
        )));
    }
    Ok(())
}

async fn debit(conn: &mut PgConnection, student_id: UserId, amount: i64) -> AppResult<()> {
    let res = sqlx::query(
        r#"
            UPDATE users
            SET balance = balance - $2
            WHERE user_id = $1 AND balance >= $2
        "#,
    )
    .bind(student_id)
    .bind(amount)
    .execute(conn)
    .await
    .map_err(AppError::SpecificOperationError)?;

    if res.rows_affected() < 1 {
        return Err(AppError::NoRowsAffectedError(format!(
            "balance of student ({student_id}) was not debited"
        )));
    }
    Ok(())
}

async fn insert_ledger_entry(
    conn: &mut PgConnection,
    student_id: UserId,
    kind: TransactionKind,
    amount: i64,
    note: Option<String>,
) -> AppResult<LedgerEntry> {
    let transaction_id = TransactionId::new();
    let created_at: DateTime<Utc> = sqlx::query_scalar(
        r#"
            INSERT INTO transactions (transaction_id, student_id, kind, amount, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING created_at
        "#,
    )
    .bind(transaction_id)
    .bind(student_id)
    .bind(kind.as_ref())
    .bind(amount)
    .bind(&note)
    .fetch_one(conn)
    .await
    .map_err(AppError::SpecificOperationError)?;

    Ok(LedgerEntry {
        id: transaction_id,
        student_id,
        kind,
        amount,
        note,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{menu::MenuRepositoryImpl, user::UserRepositoryImpl};
    use kernel::model::{
        accounting::subscription::SubscriptionPlan,
        menu::{
            event::{CreateMenuItem, PublishMenuItem},
            MealType,
        },
        user::event::CreateUser,
    };
    use kernel::repository::{menu::MenuRepository, user::UserRepository};

    struct Fixture {
        pool: sqlx::PgPool,
        repo: AccountingRepositoryImpl,
        student: UserId,
        cook: UserId,
        item: MenuItemId,
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    async fn fixture(pool: sqlx::PgPool, balance: i64, portions: i32) -> Fixture {
        priced_fixture(pool, balance, portions, 120).await
    }

    async fn priced_fixture(pool: sqlx::PgPool, balance: i64, portions: i32, price: i64) -> Fixture {
        let db = ConnectionPool::new(pool.clone());
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
                balance,
            ))
            .await
            .unwrap();
        let cook = users
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
        let item = MenuRepositoryImpl::new(db.clone())
            .publish(PublishMenuItem::new(
                CreateMenuItem::new(today(), "Soup".into(), MealType::Lunch, price, 300, None, portions),
                "Cook".into(),
            ))
            .await
            .unwrap();
        Fixture {
            pool,
            repo: AccountingRepositoryImpl::new(db),
            student: student.id,
            cook: cook.id,
            item: item.id,
        }
    }

    impl Fixture {
        fn serve(&self, count: i32, pay_type: PayType) -> ServeMeal {
            ServeMeal::new(
                self.student,
                self.item,
                count,
                pay_type,
                None,
                self.cook,
                "Cook".into(),
                today(),
            )
        }

        async fn balance(&self) -> i64 {
            sqlx::query_scalar("SELECT balance FROM users WHERE user_id = $1")
                .bind(self.student)
                .fetch_one(&self.pool)
                .await
                .unwrap()
        }

        async fn portions(&self) -> i32 {
            sqlx::query_scalar("SELECT portions_available FROM menu_items WHERE menu_item_id = $1")
                .bind(self.item)
                .fetch_one(&self.pool)
                .await
                .unwrap()
        }

        async fn count(&self, table: &str) -> i64 {
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(&self.pool)
                .await
                .unwrap()
        }
    }

    #[sqlx::test]
    async fn balance_serve_debits_and_records_a_charge(pool: sqlx::PgPool) {
        let f = fixture(pool, 500, 10).await;

        let serve = f.repo.serve(f.serve(1, PayType::Balance)).await.unwrap();
        assert_eq!(serve.amount, 120);
        assert_eq!(f.balance().await, 380);
        assert_eq!(f.portions().await, 9);

        let ledger = f.repo.find_ledger(f.student, 200).await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].kind, TransactionKind::Charge);
        assert_eq!(ledger[0].amount, -120);
    }

    #[sqlx::test]
    async fn free_item_served_from_balance_still_records_a_charge(pool: sqlx::PgPool) {
        let f = priced_fixture(pool, 50, 3, 0).await;

        let serve = f.repo.serve(f.serve(2, PayType::Balance)).await.unwrap();
        assert_eq!(serve.amount, 0);
        assert_eq!(f.balance().await, 50);
        assert_eq!(f.portions().await, 1);

        let ledger = f.repo.find_ledger(f.student, 200).await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].kind, TransactionKind::Charge);
        assert_eq!(ledger[0].amount, 0);

        f.repo.serve(f.serve(1, PayType::Free)).await.unwrap();
        assert_eq!(f.count("transactions").await, 1);
    }

    #[sqlx::test]
    async fn failed_serve_leaves_everything_untouched(pool: sqlx::PgPool) {
        let f = fixture(pool, 100, 10).await;
        let serves_before = f.count("serves").await;
        let notices_before = f.count("notices").await;

        let err = f.repo.serve(f.serve(1, PayType::Balance)).await.unwrap_err();
        assert!(matches!(err, AppError::InsufficientFunds { .. }));
        let err = f.repo.serve(f.serve(11, PayType::Free)).await.unwrap_err();
        assert!(matches!(err, AppError::InsufficientPortions { available: 10 }));
        let err = f.repo.serve(f.serve(1, PayType::Subscription)).await.unwrap_err();
        assert!(matches!(err, AppError::NoActiveSubscription));

        assert_eq!(f.balance().await, 100);
        assert_eq!(f.portions().await, 10);
        assert_eq!(f.count("serves").await, serves_before);
        assert_eq!(f.count("transactions").await, 0);
        assert_eq!(f.count("notices").await, notices_before);
    }

    #[sqlx::test]
    async fn concurrent_serves_never_oversell(pool: sqlx::PgPool) {
        let f = std::sync::Arc::new(fixture(pool, 10_000, 5).await);

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let f = f.clone();
                tokio::spawn(async move { f.repo.serve(f.serve(1, PayType::Balance)).await })
            })
            .collect();
        let mut served = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                served += 1;
            }
        }

        assert_eq!(served, 5);
        assert_eq!(f.portions().await, 0);
        assert_eq!(f.balance().await, 10_000 - 5 * 120);
    }

    #[sqlx::test]
    async fn write_off_needs_a_reason_and_stock(pool: sqlx::PgPool) {
        let f = fixture(pool, 0, 4).await;
        let write_off =
            |count, reason: &str| WriteOffPortions::new(f.item, count, reason.into(), None, f.cook, "Cook".into(), today());

        assert!(f.repo.write_off(write_off(1, "  ")).await.is_err());
        assert!(f.repo.write_off(write_off(5, "spoiled")).await.is_err());
        f.repo.write_off(write_off(4, "spoiled")).await.unwrap();

        assert_eq!(f.portions().await, 0);
        assert_eq!(f.balance().await, 0);
        let recent = f.repo.find_recent_write_offs(100).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].reason, "spoiled");
    }

    #[sqlx::test]
    async fn top_up_credits_only_positive_amounts(pool: sqlx::PgPool) {
        let f = fixture(pool, 0, 1).await;

        assert!(f.repo.top_up(TopUp::new(f.student, -5, "cash".into())).await.is_err());
        assert_eq!(f.balance().await, 0);

        let entry = f.repo.top_up(TopUp::new(f.student, 300, "".into())).await.unwrap();
        assert_eq!(entry.kind, TransactionKind::TopUp);
        assert_eq!(entry.note.as_deref(), Some("Top-up (cash)"));
        assert_eq!(f.balance().await, 300);
    }

    #[sqlx::test]
    async fn subscriptions_queue_up_and_unlock_subscription_serves(pool: sqlx::PgPool) {
        let f = fixture(pool, 2500, 10).await;
        let buy = |pay_from| BuySubscription::new(f.student, SubscriptionPlan::Month, pay_from, today());

        let first = f.repo.buy_subscription(buy(FundingSource::Balance)).await.unwrap();
        assert_eq!(first.start_date, today());
        assert_eq!(f.balance().await, 500);

        let err = f
            .repo
            .buy_subscription(buy(FundingSource::Balance))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientFunds { required: 2000, .. }));

        let second = f.repo.buy_subscription(buy(FundingSource::Cash)).await.unwrap();
        assert_eq!(second.start_date, first.until_date.succ_opt().unwrap());
        assert_eq!(f.balance().await, 500);

        let active = f
            .repo
            .find_active_subscription(f.student, today())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.until_date, second.until_date);

        let serve = f.repo.serve(f.serve(2, PayType::Subscription)).await.unwrap();
        assert_eq!(serve.amount, 0);
        assert_eq!(f.balance().await, 500);
    }
}
