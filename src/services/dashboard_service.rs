use crate::domain::account::Account;
use crate::domain::dashboard::{Dashboard, DashboardView, WidgetOrder, MAX_NUM_COLUMNS};
use crate::domain::widget::Widget;
use crate::repository::Repository;
use crate::services::error_handling::{LogHelper, Result, WebfrontError};
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct DashboardService {
    repository: Arc<Repository>,
}

impl DashboardService {
    pub fn new(repository: Arc<Repository>) -> Self {
        Self { repository }
    }

    /// Finds the dashboard to show `account`.
    ///
    /// With an id, that dashboard if the account owns it or it is shared.
    /// Without one, the account's default, falling back to the owned
    /// dashboard with the most widgets. The result carries the viewer's
    /// `shared_by_other`, `is_default` and `can_edit` flags.
    #[instrument(skip(self, account), fields(account_id = account.id))]
    pub async fn find_dashboard(
        &self,
        account: &Account,
        dashboard_id: Option<i64>,
    ) -> Result<DashboardView> {
        // Id 0 is never assigned and means "no dashboard picked"
        let resolved = match dashboard_id.filter(|&id| id != 0) {
            Some(id) => self.resolve_by_id(account, id).await,
            None => self.resolve_default(account).await,
        };

        match resolved {
            Ok((dashboard, owner_login)) => {
                Ok(DashboardView::for_viewer(dashboard, owner_login, account))
            }
            Err(e) => {
                LogHelper::log_error_with_context("find_dashboard", &e);
                Err(e)
            }
        }
    }

    pub async fn find_dashboard_by_id(
        &self,
        account: &Account,
        dashboard_id: i64,
    ) -> Result<Dashboard> {
        self.resolve_by_id(account, dashboard_id)
            .await
            .map(|(dashboard, _)| dashboard)
    }

    pub async fn find_default_dashboard(&self, account: &Account) -> Result<Dashboard> {
        self.resolve_default(account).await.map(|(dashboard, _)| dashboard)
    }

    /// Everything `account` can pick from: its own dashboards, the ones it
    /// subscribes to, and its default. Each appears once.
    pub async fn get_dashboards_for_account(
        &self,
        account: &Account,
    ) -> Result<Vec<DashboardView>> {
        let rows = self
            .repository
            .dashboards
            .list_visible_for_account(account.id, account.default_dashboard_id)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(dashboard, owner_login)| {
                DashboardView::for_viewer(dashboard, owner_login, account)
            })
            .collect())
    }

    async fn resolve_by_id(
        &self,
        account: &Account,
        dashboard_id: i64,
    ) -> Result<(Dashboard, String)> {
        let mut matches = self
            .repository
            .dashboards
            .find_visible(account.id, dashboard_id)
            .await?;
        if matches.is_empty() {
            return Err(WebfrontError::DashboardNotFound { id: dashboard_id });
        }
        if matches.len() > 1 {
            debug!(dashboard_id, count = matches.len(), "Ambiguous dashboard lookup, using first");
        }

        LogHelper::log_dashboard_resolved(account.id, dashboard_id, "id");
        Ok(matches.swap_remove(0))
    }

    async fn resolve_default(&self, account: &Account) -> Result<(Dashboard, String)> {
        if let Some(default_id) = account.default_dashboard_id {
            let mut matches = self
                .repository
                .dashboards
                .find_visible(account.id, default_id)
                .await?;
            if !matches.is_empty() {
                if matches.len() > 1 {
                    debug!(
                        default_id,
                        count = matches.len(),
                        "Ambiguous default dashboard, using first"
                    );
                }
                LogHelper::log_dashboard_resolved(account.id, default_id, "default");
                return Ok(matches.swap_remove(0));
            }
            debug!(default_id, "Default dashboard is no longer visible");
        }

        match self.repository.dashboards.most_widgets_for_account(account.id).await? {
            Some(found) => {
                LogHelper::log_dashboard_resolved(account.id, found.0.id, "most_widgets");
                Ok(found)
            }
            None => Err(WebfrontError::NoDashboards { account_id: account.id }),
        }
    }

    /// Creates a dashboard. An account's first dashboard becomes its default.
    pub async fn create_dashboard(&self, account: &Account, name: &str) -> Result<Dashboard> {
        let name = validate_name(name)?;
        let (dashboard, defaulted) = self
            .repository
            .dashboards
            .create_for_owner(&Dashboard::new(account.id, name))
            .await?;

        if defaulted {
            debug!(dashboard_id = dashboard.id, "First dashboard set as default");
        }
        LogHelper::log_dashboard_operation("create", account.id, dashboard.id, true);
        Ok(dashboard)
    }

    pub async fn rename_dashboard(
        &self,
        account: &Account,
        dashboard_id: i64,
        name: &str,
    ) -> Result<Dashboard> {
        let name = validate_name(name)?;
        let mut dashboard = self.editable(account, dashboard_id, "rename").await?;
        dashboard.name = name;
        self.repository.dashboards.update(&dashboard).await?;
        Ok(dashboard)
    }

    pub async fn set_num_columns(
        &self,
        account: &Account,
        dashboard_id: i64,
        num_columns: i64,
    ) -> Result<Dashboard> {
        if !(1..=MAX_NUM_COLUMNS).contains(&num_columns) {
            return Err(WebfrontError::validation(
                "num_columns",
                format!("must be between 1 and {}", MAX_NUM_COLUMNS),
            ));
        }
        let mut dashboard = self.editable(account, dashboard_id, "set_num_columns").await?;
        dashboard.num_columns = num_columns;
        self.repository.dashboards.update(&dashboard).await?;
        Ok(dashboard)
    }

    /// Shares or unshares a dashboard. Unsharing drops its subscribers.
    pub async fn set_shared(
        &self,
        account: &Account,
        dashboard_id: i64,
        shared: bool,
    ) -> Result<Dashboard> {
        let mut dashboard = self.editable(account, dashboard_id, "set_shared").await?;
        let dropped = self.repository.dashboards.set_shared(dashboard_id, shared).await?;
        dashboard.is_shared = shared;

        if dropped > 0 {
            debug!(dashboard_id, dropped, "Removed subscriptions to unshared dashboard");
        }
        LogHelper::log_dashboard_operation("set_shared", account.id, dashboard_id, true);
        Ok(dashboard)
    }

    /// Deletes a dashboard unless it is its owner's last one.
    pub async fn delete_dashboard(&self, account: &Account, dashboard_id: i64) -> Result<()> {
        self.editable(account, dashboard_id, "delete").await?;

        // Defaults, subscriptions and widgets go with it
        if !self.repository.dashboards.delete_unless_last(dashboard_id).await? {
            LogHelper::log_dashboard_operation("delete", account.id, dashboard_id, false);
            return Err(WebfrontError::validation(
                "dashboard",
                "cannot delete the last dashboard",
            ));
        }

        LogHelper::log_dashboard_operation("delete", account.id, dashboard_id, true);
        Ok(())
    }

    pub async fn set_default_dashboard(
        &self,
        account: &Account,
        dashboard_id: i64,
    ) -> Result<Dashboard> {
        let (dashboard, _) = self.resolve_by_id(account, dashboard_id).await?;
        self.repository
            .accounts
            .set_default_dashboard(account.id, dashboard_id)
            .await?;
        LogHelper::log_dashboard_operation("set_default", account.id, dashboard_id, true);
        Ok(dashboard)
    }

    /// Subscribes to another account's shared dashboard.
    pub async fn subscribe(&self, account: &Account, dashboard_id: i64) -> Result<()> {
        let (dashboard, _) = self.resolve_by_id(account, dashboard_id).await?;
        if dashboard.account_id == account.id {
            return Err(WebfrontError::validation(
                "dashboard",
                "cannot subscribe to own dashboard",
            ));
        }

        let dashboards = &self.repository.dashboards;
        if !dashboards.subscribe(account.id, dashboard_id).await?
            && !dashboards.is_subscribed(account.id, dashboard_id).await?
        {
            // Unshared since it was looked up
            return Err(WebfrontError::DashboardNotFound { id: dashboard_id });
        }

        LogHelper::log_dashboard_operation("subscribe", account.id, dashboard_id, true);
        Ok(())
    }

    pub async fn unsubscribe(&self, account: &Account, dashboard_id: i64) -> Result<bool> {
        Ok(self.repository.dashboards.unsubscribe(account.id, dashboard_id).await?)
    }

    pub async fn widgets(&self, account: &Account, dashboard_id: i64) -> Result<Vec<Widget>> {
        self.resolve_by_id(account, dashboard_id).await?;
        Ok(self.repository.widgets.list_for_dashboard(dashboard_id).await?)
    }

    /// Appends a navlet to the end of the first column. The widget belongs
    /// to the dashboard's owner, whoever adds it.
    pub async fn add_widget(
        &self,
        account: &Account,
        dashboard_id: i64,
        navlet: &str,
    ) -> Result<Widget> {
        if navlet.trim().is_empty() {
            return Err(WebfrontError::validation("navlet", "must not be empty"));
        }
        let dashboard = self.editable(account, dashboard_id, "add_widget").await?;

        let order = self.repository.widgets.count_for_dashboard(dashboard_id).await?;
        let widget = Widget::new(dashboard_id, dashboard.account_id, navlet.trim())
            .with_position(0, order);
        Ok(self.repository.widgets.create(&widget).await?)
    }

    pub async fn remove_widget(&self, account: &Account, widget_id: i64) -> Result<()> {
        let widget = self
            .repository
            .widgets
            .get(widget_id)
            .await?
            .ok_or(WebfrontError::WidgetNotFound { id: widget_id })?;
        self.editable(account, widget.dashboard_id, "remove_widget").await?;

        self.repository.widgets.delete(widget_id).await?;
        Ok(())
    }

    /// Stores the column layout posted by the dashboard page. Widgets that
    /// are not on this dashboard are skipped. Returns how many moved.
    pub async fn save_widget_order(
        &self,
        account: &Account,
        dashboard_id: i64,
        order: &WidgetOrder,
    ) -> Result<usize> {
        let dashboard = self.editable(account, dashboard_id, "save_widget_order").await?;
        if order.len() as i64 > dashboard.num_columns {
            return Err(WebfrontError::validation(
                "order",
                format!("dashboard has {} columns, got {}", dashboard.num_columns, order.len()),
            ));
        }

        let mut updated = 0;
        for (column, positions) in order.iter().enumerate() {
            for (&widget_id, &position) in positions {
                if self
                    .repository
                    .widgets
                    .update_position(dashboard_id, widget_id, column as i64, position)
                    .await?
                {
                    updated += 1;
                }
            }
        }

        debug!(dashboard_id, updated, "Saved widget order");
        Ok(updated)
    }

    /// Loads a dashboard `account` may modify. Invisible dashboards read as
    /// missing.
    async fn editable(
        &self,
        account: &Account,
        dashboard_id: i64,
        action: &str,
    ) -> Result<Dashboard> {
        let (dashboard, _) = self
            .repository
            .dashboards
            .get(dashboard_id)
            .await?
            .filter(|(dashboard, _)| dashboard.is_visible_to(account) || account.is_admin)
            .ok_or(WebfrontError::DashboardNotFound { id: dashboard_id })?;

        if !dashboard.can_edit(account) {
            LogHelper::log_dashboard_operation(action, account.id, dashboard_id, false);
            return Err(WebfrontError::permission_denied(action, dashboard_id));
        }

        Ok(dashboard)
    }
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WebfrontError::validation("name", "must not be empty"));
    }
    Ok(name.to_string())
}
