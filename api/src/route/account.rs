use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::{
    auth::{login, login_page, logout, register, register_page},
    dashboard::{index, show_dashboard},
    notification::show_notifications,
};

pub fn build_account_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout).post(logout))
        .route("/register", get(register_page).post(register))
        .route("/dashboard", get(show_dashboard))
        .route("/notifications", get(show_notifications))
}
