// Test helpers for integration testing

use crate::domain::account::Account;
use crate::domain::dashboard::Dashboard;
use crate::domain::widget::Widget;
use crate::repository::database::init_test_database;
use crate::repository::Repository;
use crate::services::DashboardService;
use anyhow::Result;
use std::sync::Arc;

pub struct TestContext {
    pub repository: Arc<Repository>,
    pub service: DashboardService,
}

impl TestContext {
    pub async fn new_for_test() -> Result<Self> {
        let repository = Arc::new(Repository::new(init_test_database().await?));
        Ok(Self {
            service: DashboardService::new(repository.clone()),
            repository,
        })
    }

    pub async fn account(&self, id: i64, login: &str) -> Result<Account> {
        self.repository.accounts.create(&Account::new(id, login)).await?;
        self.reload(id).await
    }

    /// Current state of an account, including its default dashboard.
    pub async fn reload(&self, id: i64) -> Result<Account> {
        self.repository
            .accounts
            .get(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("account {} does not exist", id))
    }

    /// Inserts a dashboard directly, bypassing the default-on-first rule.
    pub async fn dashboard(
        &self,
        owner: &Account,
        name: &str,
        shared: bool,
        widgets: usize,
    ) -> Result<Dashboard> {
        let mut dashboard = Dashboard::new(owner.id, name);
        dashboard.is_shared = shared;
        let dashboard = self.repository.dashboards.create(&dashboard).await?;

        for i in 0..widgets {
            let widget = Widget::new(dashboard.id, owner.id, format!("navlet-{}", i))
                .with_position(0, i as i64);
            self.repository.widgets.create(&widget).await?;
        }

        Ok(dashboard)
    }
}
