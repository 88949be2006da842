use crate::model::{
    id::UserId,
    user::{event::CreateUser, User},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>>;
    async fn find_students(&self) -> AppResult<Vec<User>>;
    // hashes the password and tells the admins; a duplicate login is LoginTaken
    async fn register(&self, event: CreateUser) -> AppResult<User>;
    // inserts the default accounts into an empty users table
    async fn seed_defaults(&self) -> AppResult<usize>;
}
