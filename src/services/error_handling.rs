use thiserror::Error;
use tracing::{error, info, warn};

pub type Result<T> = std::result::Result<T, WebfrontError>;

#[derive(Error, Debug)]
pub enum WebfrontError {
    #[error("Dashboard not found: {id}")]
    DashboardNotFound { id: i64 },

    #[error("Account {account_id} has no dashboards")]
    NoDashboards { account_id: i64 },

    #[error("Widget not found: {id}")]
    WidgetNotFound { id: i64 },

    #[error("Insufficient permissions: {action} on dashboard {dashboard_id}")]
    PermissionDenied { action: String, dashboard_id: i64 },

    #[error("Validation failed for {field}: {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Database operation failed: {0}")]
    Database(#[from] anyhow::Error),
}

impl WebfrontError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            WebfrontError::DashboardNotFound { .. }
                | WebfrontError::NoDashboards { .. }
                | WebfrontError::WidgetNotFound { .. }
        )
    }

    /// The HTTP status a web front would answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            WebfrontError::DashboardNotFound { .. }
            | WebfrontError::NoDashboards { .. }
            | WebfrontError::WidgetNotFound { .. } => 404,
            WebfrontError::PermissionDenied { .. } => 403,
            WebfrontError::ValidationError { .. } => 400,
            WebfrontError::Database(_) => 500,
        }
    }

    pub(crate) fn permission_denied(action: &str, dashboard_id: i64) -> Self {
        WebfrontError::PermissionDenied {
            action: action.to_string(),
            dashboard_id,
        }
    }

    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        WebfrontError::ValidationError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Structured logging helpers
pub struct LogHelper;

impl LogHelper {
    pub fn log_dashboard_resolved(account_id: i64, dashboard_id: i64, source: &str) {
        info!(
            account_id = account_id,
            dashboard_id = dashboard_id,
            source = %source,
            "Dashboard resolved"
        );
    }

    pub fn log_dashboard_operation(
        operation: &str,
        account_id: i64,
        dashboard_id: i64,
        success: bool,
    ) {
        if success {
            info!(
                account_id = account_id,
                dashboard_id = dashboard_id,
                operation = %operation,
                "Dashboard operation completed successfully"
            );
        } else {
            warn!(
                account_id = account_id,
                dashboard_id = dashboard_id,
                operation = %operation,
                "Dashboard operation refused"
            );
        }
    }

    pub fn log_error_with_context(context: &str, error: &WebfrontError) {
        if error.is_not_found() {
            warn!(context = %context, error = %error, "Lookup failed");
        } else {
            error!(context = %context, error = %error, "Error occurred");
        }
    }
}

/// User-friendly error messages
pub struct UserErrorFormatter;

impl UserErrorFormatter {
    pub fn format_for_ui(error: &WebfrontError) -> String {
        match error {
            WebfrontError::DashboardNotFound { .. } | WebfrontError::WidgetNotFound { .. } => {
                "The requested dashboard could not be found.".to_string()
            }
            WebfrontError::NoDashboards { .. } => {
                "You have no dashboards yet. Create one to get started.".to_string()
            }
            WebfrontError::PermissionDenied { .. } => {
                "You don't have permission to change this dashboard.".to_string()
            }
            WebfrontError::ValidationError { field, reason } => {
                format!("Invalid {}: {}", field, reason)
            }
            WebfrontError::Database(_) => {
                "A database error occurred. Please try again or contact support if the issue \
                 persists."
                    .to_string()
            }
        }
    }
}
