use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::menu::{add_menu_item, show_availability, show_menu, show_menu_history};

pub fn build_catalog_routers() -> Router<AppRegistry> {
    let menu_routers = Router::new()
        .route("/", get(show_menu).post(add_menu_item))
        .route("/history", get(show_menu_history));

    Router::new()
        .nest("/menu", menu_routers)
        .route("/availability", get(show_availability))
}
