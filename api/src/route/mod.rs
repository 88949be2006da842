use axum::Router;
use registry::AppRegistry;

pub mod account;
pub mod catalog;
pub mod desk;
pub mod health;
pub mod kitchen;
pub mod ledger;
pub mod office;

pub fn routes() -> Router<AppRegistry> {
    Router::new()
        .merge(health::build_health_check_routers())
        .merge(account::build_account_routers())
        .merge(catalog::build_catalog_routers())
        .merge(ledger::build_ledger_routers())
        .merge(desk::build_desk_routers())
        .merge(kitchen::build_kitchen_routers())
        .merge(office::build_office_routers())
}
