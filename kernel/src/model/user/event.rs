use crate::model::role::Role;
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateUser {
    pub login: String,
    pub password: String,
    pub name: String,
    pub work: String,
    pub role: Role,
    pub benefit: Option<String>,
    pub allergy: Option<String>,
    pub initial_balance: i64,
}
