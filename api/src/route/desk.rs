use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    complaint::{answer_complaint, complaint_form, create_complaint, show_complaints},
    order::{approve_order, create_order, reject_order, show_orders},
};

pub fn build_desk_routers() -> Router<AppRegistry> {
    let orders_routers = Router::new()
        .route("/", get(show_orders))
        .route("/create", post(create_order))
        .route("/:order_id/approve", get(approve_order))
        .route("/:order_id/reject", get(reject_order));

    let complaints_routers = Router::new()
        .route("/", get(show_complaints))
        .route("/:complaint_id/answer", post(answer_complaint));

    Router::new()
        .nest("/orders", orders_routers)
        .nest("/complaints", complaints_routers)
        .route("/complaint", get(complaint_form).post(create_complaint))
}
