use crate::database::{model::order::OrderRow, ConnectionPool};
use crate::repository::notice::insert_notice;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{OrderId, UserId},
    notice::{event::CreateNotice, Recipient},
    order::{
        event::{CreateOrder, DecideOrder},
        Order, OrderStatus,
    },
};
use kernel::repository::order::OrderRepository;
use shared::error::{AppError, AppResult};
use sqlx::types::chrono::{DateTime, Utc};

#[derive(new)]
pub struct OrderRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl OrderRepository for OrderRepositoryImpl {
    async fn create(&self, event: CreateOrder) -> AppResult<Order> {
        let item = event.item.trim().to_string();
        if item.is_empty() {
            return Err(AppError::UnprocessableEntity("the dish is required".into()));
        }
        if event.count <= 0 {
            return Err(AppError::UnprocessableEntity(
                "the number of portions must be positive".into(),
            ));
        }

        let mut tx = self.db.begin().await?;

        let order_id = OrderId::new();
        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
                INSERT INTO orders
                (order_id, student_id, student_name, meal_type, item, count, comment, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING created_at
            "#,
        )
        .bind(order_id)
        .bind(event.student_id)
        .bind(&event.student_name)
        .bind(event.meal_type.as_ref())
        .bind(&item)
        .bind(event.count)
        .bind(&event.comment)
        .bind(OrderStatus::New.as_ref())
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        insert_notice(
            &mut tx,
            CreateNotice::new(
                "New order".into(),
                Some(format!(
                    "{} requested: {} x{} ({})",
                    event.student_name, item, event.count, event.meal_type
                )),
                event.student_name.clone(),
                Recipient::Admins,
            ),
        )
        .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(Order {
            id: order_id,
            student_id: event.student_id,
            student_name: event.student_name,
            meal_type: event.meal_type,
            item,
            count: event.count,
            comment: event.comment,
            status: OrderStatus::New,
            created_at,
        })
    }

    async fn decide(&self, event: DecideOrder) -> AppResult<Order> {
        let mut tx = self.db.begin().await?;

        let row: Option<OrderRow> = sqlx::query_as(
            r#"
                SELECT order_id, student_id, student_name, meal_type, item, count,
                       comment, status, created_at
                FROM orders
                WHERE order_id = $1
                FOR UPDATE
            "#,
        )
        .bind(event.order_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::EntityNotFound(format!(
                "order ({}) was not found",
                event.order_id
            )));
        };
        let mut order = Order::try_from(row)?;
        order.status = order.status.transition(event.decision)?;

        sqlx::query("UPDATE orders SET status = $2 WHERE order_id = $1")
            .bind(order.id)
            .bind(order.status.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let login: String = sqlx::query_scalar("SELECT login FROM users WHERE user_id = $1")
            .bind(order.student_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let title = match order.status {
            OrderStatus::Approved => "Order approved",
            _ => "Order rejected",
        };
        insert_notice(
            &mut tx,
            CreateNotice::new(
                title.into(),
                Some(format!("{}: {} x{}", title, order.item, order.count)),
                event.decided_by,
                Recipient::Login(login),
            ),
        )
        .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(order_id = %order.id, status = %order.status, "order decided");
        Ok(order)
    }

    async fn find_all(&self, limit: i64) -> AppResult<Vec<Order>> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r#"
                SELECT order_id, student_id, student_name, meal_type, item, count,
                       comment, status, created_at
                FROM orders
                ORDER BY created_at DESC
                LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn find_by_student(&self, student_id: UserId, limit: i64) -> AppResult<Vec<Order>> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r#"
                SELECT order_id, student_id, student_name, meal_type, item, count,
                       comment, status, created_at
                FROM orders
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

        rows.into_iter().map(Order::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::user::UserRepositoryImpl;
    use kernel::model::{menu::MealType, role::Role, user::event::CreateUser};
    use kernel::repository::user::UserRepository;

    #[sqlx::test]
    async fn decided_orders_notify_the_student_once(pool: sqlx::PgPool) {
        let db = ConnectionPool::new(pool.clone());
        let student = UserRepositoryImpl::new(db.clone())
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
        let repo = OrderRepositoryImpl::new(db);

        let order = repo
            .create(CreateOrder::new(
                student.id,
                student.name.clone(),
                MealType::Lunch,
                "Soup".into(),
                2,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::New);

        let approved = repo
            .decide(DecideOrder::new(order.id, OrderStatus::Approved, "Cook".into()))
            .await
            .unwrap();
        assert_eq!(approved.status, OrderStatus::Approved);

        let err = repo
            .decide(DecideOrder::new(order.id, OrderStatus::Rejected, "Cook".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));

        let to_student: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notices WHERE recipient = 'ivanov'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(to_student, 1);

        assert_eq!(repo.find_by_student(student.id, 200).await.unwrap().len(), 1);
        assert!(repo
            .create(CreateOrder::new(student.id, "Ivan".into(), MealType::Lunch, "Soup".into(), 0, None))
            .await
            .is_err());
    }
}
