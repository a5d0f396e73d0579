use crate::domain::account::Account;
use anyhow::Result;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

#[derive(Clone)]
pub struct AccountRepository {
    pool: Arc<SqlitePool>,
}

impl AccountRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, account: &Account) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, login, name, is_admin)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(account.id)
        .bind(&account.login)
        .bind(&account.name)
        .bind(account.is_admin)
        .execute(self.pool.as_ref())
        .await?;

        if let Some(dashboard_id) = account.default_dashboard_id {
            self.set_default_dashboard(account.id, dashboard_id).await?;
        }

        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT a.id, a.login, a.name, a.is_admin, d.dashboard_id
            FROM accounts a
            LEFT JOIN account_default_dashboards d ON d.account_id = a.id
            WHERE a.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|row| Account {
            id: row.get("id"),
            login: row.get("login"),
            name: row.get("name"),
            is_admin: row.get("is_admin"),
            default_dashboard_id: row.get("dashboard_id"),
        }))
    }

    pub async fn set_default_dashboard(&self, account_id: i64, dashboard_id: i64) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO account_default_dashboards (account_id, dashboard_id)
            VALUES (?, ?)
            ON CONFLICT(account_id) DO UPDATE SET dashboard_id = excluded.dashboard_id
            "#,
        )
        .bind(account_id)
        .bind(dashboard_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::Dashboard;
    use crate::repository::database::init_test_database;
    use crate::repository::Repository;

    #[tokio::test]
    async fn test_create_and_get_account() {
        let repo = Repository::new(init_test_database().await.unwrap());
        let account = Account::new(1000, "ola");
        repo.accounts.create(&account).await.unwrap();

        let fetched = repo.accounts.get(1000).await.unwrap().unwrap();
        assert_eq!(fetched, account);
        assert!(repo.accounts.get(4242).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_default_dashboard_roundtrip() {
        let repo = Repository::new(init_test_database().await.unwrap());
        repo.accounts.create(&Account::new(1000, "ola")).await.unwrap();
        let first = repo.dashboards.create(&Dashboard::new(1000, "First")).await.unwrap();
        let second = repo.dashboards.create(&Dashboard::new(1000, "Second")).await.unwrap();

        repo.accounts.set_default_dashboard(1000, first.id).await.unwrap();
        repo.accounts.set_default_dashboard(1000, second.id).await.unwrap();
        let account = repo.accounts.get(1000).await.unwrap().unwrap();
        assert_eq!(account.default_dashboard_id, Some(second.id));

        // The default goes with its dashboard
        repo.dashboards.delete(second.id).await.unwrap();
        let account = repo.accounts.get(1000).await.unwrap().unwrap();
        assert!(!account.has_default_dashboard());
    }
}
