use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    payment::{show_payments, top_up},
    subscription::{buy_subscription, show_subscriptions},
};

pub fn build_ledger_routers() -> Router<AppRegistry> {
    let payments_routers = Router::new()
        .route("/", get(show_payments))
        .route("/topup", post(top_up));

    let subscriptions_routers = Router::new()
        .route("/", get(show_subscriptions).post(buy_subscription))
        .route("/buy", post(buy_subscription));

    Router::new()
        .nest("/payments", payments_routers)
        .nest("/subscriptions", subscriptions_routers)
}
