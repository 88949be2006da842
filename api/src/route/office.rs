use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::report::{create_report, download_report, show_reports};

pub fn build_office_routers() -> Router<AppRegistry> {
    let reports_routers = Router::new()
        .route("/", get(show_reports))
        .route("/create", get(create_report).post(create_report))
        .route("/:report_id/download", get(download_report));

    Router::new().nest("/reports", reports_routers)
}
