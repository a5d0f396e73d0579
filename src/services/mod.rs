mod dashboard_service;
pub mod error_handling;

pub use dashboard_service::DashboardService;
pub use error_handling::{Result, WebfrontError};
