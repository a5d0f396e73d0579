use crate::domain::account::Account;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_NUM_COLUMNS: i64 = 3;
pub const MAX_NUM_COLUMNS: i64 = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dashboard {
    pub id: i64,
    pub name: String,
    pub account_id: i64,
    pub is_shared: bool,
    pub num_columns: i64,
    pub created_at: DateTime<Utc>,
}

impl Dashboard {
    /// A new, unsaved dashboard. `id` is assigned on insert.
    pub fn new(account_id: i64, name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            account_id,
            is_shared: false,
            num_columns: DEFAULT_NUM_COLUMNS,
            created_at: Utc::now(),
        }
    }

    pub fn can_edit(&self, account: &Account) -> bool {
        account.is_admin || self.account_id == account.id
    }

    pub fn is_default_for_account(&self, account: &Account) -> bool {
        account.default_dashboard_id == Some(self.id)
    }

    /// Shared by someone other than `viewer`.
    pub fn shared_by_other(&self, viewer: &Account) -> bool {
        self.is_shared && self.account_id != viewer.id
    }

    pub fn is_visible_to(&self, account: &Account) -> bool {
        self.is_shared || self.account_id == account.id
    }
}

/// A dashboard as presented to one particular viewer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardView {
    pub dashboard: Dashboard,
    pub owner_login: String,
    pub can_edit: bool,
    pub shared_by_other: bool,
    pub is_default: bool,
}

impl DashboardView {
    pub fn for_viewer(dashboard: Dashboard, owner_login: String, viewer: &Account) -> Self {
        Self {
            can_edit: dashboard.can_edit(viewer),
            shared_by_other: dashboard.shared_by_other(viewer),
            is_default: dashboard.is_default_for_account(viewer),
            owner_login,
            dashboard,
        }
    }

    pub fn id(&self) -> i64 {
        self.dashboard.id
    }
}

/// Widget placement as posted by the dashboard page: one map per column,
/// widget id to position within that column.
pub type WidgetOrder = Vec<HashMap<i64, i64>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard_owned_by(account_id: i64) -> Dashboard {
        let mut dashboard = Dashboard::new(account_id, "Overview");
        dashboard.id = 7;
        dashboard
    }

    #[test]
    fn test_new_dashboard() {
        let dashboard = Dashboard::new(1000, "Overview");
        assert_eq!(dashboard.name, "Overview");
        assert_eq!(dashboard.num_columns, DEFAULT_NUM_COLUMNS);
        assert!(!dashboard.is_shared);
    }

    #[test]
    fn test_can_edit() {
        let owner = Account::new(1000, "owner");
        let other = Account::new(1001, "other");
        let admin = Account::new(1, "admin");
        let dashboard = dashboard_owned_by(owner.id);

        assert!(dashboard.can_edit(&owner));
        assert!(!dashboard.can_edit(&other));
        assert!(dashboard.can_edit(&admin));
    }

    #[test]
    fn test_shared_by_other() {
        let owner = Account::new(1000, "owner");
        let other = Account::new(1001, "other");
        let mut dashboard = dashboard_owned_by(owner.id);

        assert!(!dashboard.shared_by_other(&other));
        dashboard.is_shared = true;
        assert!(dashboard.shared_by_other(&other));
        assert!(!dashboard.shared_by_other(&owner));
    }

    #[test]
    fn test_view_flags() {
        let mut viewer = Account::new(1001, "viewer");
        viewer.default_dashboard_id = Some(7);
        let mut dashboard = dashboard_owned_by(1000);
        dashboard.is_shared = true;

        let view = DashboardView::for_viewer(dashboard, "owner".to_string(), &viewer);
        assert!(view.is_default);
        assert!(view.shared_by_other);
        assert!(!view.can_edit);
        assert_eq!(view.id(), 7);
    }
}
