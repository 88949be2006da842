use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::{
    kitchen::{serve_meal, show_serve, show_write_off, write_off},
    procurement::{create_procurement, show_procurement},
};

pub fn build_kitchen_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/serve", get(show_serve).post(serve_meal))
        .route("/writeoff", get(show_write_off).post(write_off))
        .route("/procurement", get(show_procurement).post(create_procurement))
}
