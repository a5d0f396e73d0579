pub mod account_repository;
pub mod dashboard_repository;
pub mod database;
pub mod widget_repository;

use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repository {
    pub pool: Arc<SqlitePool>,
    pub accounts: account_repository::AccountRepository,
    pub dashboards: dashboard_repository::DashboardRepository,
    pub widgets: widget_repository::WidgetRepository,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        let pool = Arc::new(pool);
        Self {
            accounts: account_repository::AccountRepository::new(pool.clone()),
            dashboards: dashboard_repository::DashboardRepository::new(pool.clone()),
            widgets: widget_repository::WidgetRepository::new(pool.clone()),
            pool,
        }
    }
}
