use serde::{Deserialize, Serialize};

/// The anonymous account every unauthenticated request runs as.
pub const DEFAULT_ACCOUNT_ID: i64 = 0;
/// The built-in administrator account.
pub const ADMIN_ACCOUNT_ID: i64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: i64,
    pub login: String,
    pub name: String,
    pub is_admin: bool,
    pub default_dashboard_id: Option<i64>,
}

impl Account {
    pub fn new(id: i64, login: impl Into<String>) -> Self {
        let login = login.into();
        Self {
            id,
            name: login.clone(),
            login,
            is_admin: id == ADMIN_ACCOUNT_ID,
            default_dashboard_id: None,
        }
    }

    pub fn has_default_dashboard(&self) -> bool {
        self.default_dashboard_id.is_some()
    }

    pub fn is_anonymous(&self) -> bool {
        self.id == DEFAULT_ACCOUNT_ID
    }
}
