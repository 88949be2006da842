use std::sync::Arc;

use adapter::redis::RedisClient;
use adapter::repository::{
    accounting::AccountingRepositoryImpl, auth::AuthRepositoryImpl,
    complaint::ComplaintRepositoryImpl, dashboard::DashboardRepositoryImpl,
    health::HealthCheckRepositoryImpl, menu::MenuRepositoryImpl, notice::NoticeRepositoryImpl,
    order::OrderRepositoryImpl, procurement::ProcurementRepositoryImpl,
    report::ReportRepositoryImpl, user::UserRepositoryImpl,
};
use adapter::{database::ConnectionPool, storage::FsReportStorage};
use kernel::repository::{
    accounting::AccountingRepository, auth::AuthRepository, complaint::ComplaintRepository,
    dashboard::DashboardRepository, health::HealthCheckRepository, menu::MenuRepository,
    notice::NoticeRepository, order::OrderRepository, procurement::ProcurementRepository,
    report::ReportRepository, user::UserRepository,
};
use shared::config::{AppConfig, RegistrationConfig};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    user_repository: Arc<dyn UserRepository>,
    menu_repository: Arc<dyn MenuRepository>,
    accounting_repository: Arc<dyn AccountingRepository>,
    order_repository: Arc<dyn OrderRepository>,
    complaint_repository: Arc<dyn ComplaintRepository>,
    notice_repository: Arc<dyn NoticeRepository>,
    procurement_repository: Arc<dyn ProcurementRepository>,
    report_repository: Arc<dyn ReportRepository>,
    dashboard_repository: Arc<dyn DashboardRepository>,
    registration: Arc<RegistrationConfig>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let menu_repository = Arc::new(MenuRepositoryImpl::new(pool.clone()));
        let accounting_repository = Arc::new(AccountingRepositoryImpl::new(pool.clone()));
        let order_repository = Arc::new(OrderRepositoryImpl::new(pool.clone()));
        let complaint_repository = Arc::new(ComplaintRepositoryImpl::new(pool.clone()));
        let notice_repository = Arc::new(NoticeRepositoryImpl::new(pool.clone()));
        let procurement_repository = Arc::new(ProcurementRepositoryImpl::new(pool.clone()));
        let report_repository = Arc::new(ReportRepositoryImpl::new(
            pool.clone(),
            Arc::new(FsReportStorage::new(&app_config.report.directory)),
        ));
        let dashboard_repository = Arc::new(DashboardRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            auth_repository,
            user_repository,
            menu_repository,
            accounting_repository,
            order_repository,
            complaint_repository,
            notice_repository,
            procurement_repository,
            report_repository,
            dashboard_repository,
            registration: Arc::new(app_config.registration),
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn menu_repository(&self) -> Arc<dyn MenuRepository> {
        self.menu_repository.clone()
    }

    pub fn accounting_repository(&self) -> Arc<dyn AccountingRepository> {
        self.accounting_repository.clone()
    }

    pub fn order_repository(&self) -> Arc<dyn OrderRepository> {
        self.order_repository.clone()
    }

    pub fn complaint_repository(&self) -> Arc<dyn ComplaintRepository> {
        self.complaint_repository.clone()
    }

    pub fn notice_repository(&self) -> Arc<dyn NoticeRepository> {
        self.notice_repository.clone()
    }

    pub fn procurement_repository(&self) -> Arc<dyn ProcurementRepository> {
        self.procurement_repository.clone()
    }

    pub fn report_repository(&self) -> Arc<dyn ReportRepository> {
        self.report_repository.clone()
    }

    pub fn dashboard_repository(&self) -> Arc<dyn DashboardRepository> {
        self.dashboard_repository.clone()
    }

    // registration codes per role
    pub fn registration(&self) -> Arc<RegistrationConfig> {
        self.registration.clone()
    }
}
