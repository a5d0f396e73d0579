use crate::domain::dashboard::Dashboard;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::sync::Arc;

const DASHBOARD_COLUMNS: &str =
    "d.id, d.name, d.account_id, d.is_shared, d.num_columns, d.created_at, a.login AS owner_login";

#[derive(Clone)]
pub struct DashboardRepository {
    pool: Arc<SqlitePool>,
}

impl DashboardRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Inserts `dashboard` and returns it with its assigned id.
    pub async fn create(&self, dashboard: &Dashboard) -> Result<Dashboard> {
        let result = sqlx::query(
            r#"
            INSERT INTO dashboards (name, account_id, is_shared, num_columns, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&dashboard.name)
        .bind(dashboard.account_id)
        .bind(dashboard.is_shared)
        .bind(dashboard.num_columns)
        .bind(dashboard.created_at.to_rfc3339())
        .execute(self.pool.as_ref())
        .await?;

        let mut created = dashboard.clone();
        created.id = result.last_insert_rowid();
        Ok(created)
    }

    /// Inserts `dashboard` and, when it is the owner's only dashboard, makes
    /// it the owner's default. Returns the saved dashboard and whether it
    /// became the default.
    pub async fn create_for_owner(&self, dashboard: &Dashboard) -> Result<(Dashboard, bool)> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO dashboards (name, account_id, is_shared, num_columns, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&dashboard.name)
        .bind(dashboard.account_id)
        .bind(dashboard.is_shared)
        .bind(dashboard.num_columns)
        .bind(dashboard.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;
        let id = result.last_insert_rowid();

        let defaulted = sqlx::query(
            r#"
            INSERT OR IGNORE INTO account_default_dashboards (account_id, dashboard_id)
            SELECT ?, ?
            WHERE (SELECT COUNT(*) FROM dashboards WHERE account_id = ?) = 1
            "#,
        )
        .bind(dashboard.account_id)
        .bind(id)
        .bind(dashboard.account_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        tx.commit().await?;

        let mut created = dashboard.clone();
        created.id = id;
        Ok((created, defaulted))
    }

    pub async fn update(&self, dashboard: &Dashboard) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE dashboards SET name = ?, is_shared = ?, num_columns = ?
            WHERE id = ?
            "#,
        )
        .bind(&dashboard.name)
        .bind(dashboard.is_shared)
        .bind(dashboard.num_columns)
        .bind(dashboard.id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn get(&self, id: i64) -> Result<Option<(Dashboard, String)>> {
        let sql = format!(
            "SELECT {} FROM dashboards d JOIN accounts a ON a.id = d.account_id WHERE d.id = ?",
            DASHBOARD_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(|row| self.row_to_dashboard(row)).transpose()
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM dashboards WHERE id = ?")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a dashboard unless it is the last one its owner has.
    pub async fn delete_unless_last(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM dashboards
            WHERE id = ?
              AND (SELECT COUNT(*) FROM dashboards o
                   WHERE o.account_id = dashboards.account_id) > 1
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sets the shared flag. Unsharing drops every subscription in the same
    /// transaction; the number dropped is returned.
    pub async fn set_shared(&self, id: i64, shared: bool) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE dashboards SET is_shared = ? WHERE id = ?")
            .bind(shared)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let dropped = if shared {
            0
        } else {
            sqlx::query("DELETE FROM dashboard_subscriptions WHERE dashboard_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected()
        };

        tx.commit().await?;
        Ok(dropped)
    }

    /// Every dashboard with `dashboard_id` that `account_id` owns or that is
    /// shared. Lowest id first.
    pub async fn find_visible(
        &self,
        account_id: i64,
        dashboard_id: i64,
    ) -> Result<Vec<(Dashboard, String)>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM dashboards d
            JOIN accounts a ON a.id = d.account_id
            WHERE d.id = ? AND (d.account_id = ? OR d.is_shared = 1)
            ORDER BY d.id
            "#,
            DASHBOARD_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(dashboard_id)
            .bind(account_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(|row| self.row_to_dashboard(row)).collect()
    }

    /// The owned dashboard carrying the most widgets. Ties go to the lowest id.
    pub async fn most_widgets_for_account(
        &self,
        account_id: i64,
    ) -> Result<Option<(Dashboard, String)>> {
        let sql = format!(
            r#"
            SELECT {}, COUNT(w.id) AS widget_count
            FROM dashboards d
            JOIN accounts a ON a.id = d.account_id
            LEFT JOIN widgets w ON w.dashboard_id = d.id
            WHERE d.account_id = ?
            GROUP BY d.id
            ORDER BY widget_count DESC, d.id ASC
            LIMIT 1
            "#,
            DASHBOARD_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(|row| self.row_to_dashboard(row)).transpose()
    }

    pub async fn list_visible_for_account(
        &self,
        account_id: i64,
        default_dashboard_id: Option<i64>,
    ) -> Result<Vec<(Dashboard, String)>> {
        let sql = format!(
            r#"
            SELECT DISTINCT {}
            FROM dashboards d
            JOIN accounts a ON a.id = d.account_id
            LEFT JOIN dashboard_subscriptions s ON s.dashboard_id = d.id
            WHERE d.account_id = ?
               OR s.account_id = ?
               OR d.id = ?
            ORDER BY d.name, d.id
            "#,
            DASHBOARD_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(account_id)
            .bind(default_dashboard_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(|row| self.row_to_dashboard(row)).collect()
    }

    /// Subscribes `account_id` to a dashboard that is shared and owned by
    /// someone else. Returns whether a subscription was added.
    pub async fn subscribe(&self, account_id: i64, dashboard_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO dashboard_subscriptions (account_id, dashboard_id)
            SELECT ?, id FROM dashboards
            WHERE id = ? AND is_shared = 1 AND account_id != ?
            "#,
        )
        .bind(account_id)
        .bind(dashboard_id)
        .bind(account_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn unsubscribe(&self, account_id: i64, dashboard_id: i64) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM dashboard_subscriptions WHERE account_id = ? AND dashboard_id = ?",
        )
        .bind(account_id)
        .bind(dashboard_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn is_subscribed(&self, account_id: i64, dashboard_id: i64) -> Result<bool> {
        let row = sqlx::query(
            "SELECT 1 FROM dashboard_subscriptions WHERE account_id = ? AND dashboard_id = ?",
        )
        .bind(account_id)
        .bind(dashboard_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.is_some())
    }

    fn row_to_dashboard(&self, row: SqliteRow) -> Result<(Dashboard, String)> {
        let created_at: String = row.get("created_at");
        let dashboard = Dashboard {
            id: row.get("id"),
            name: row.get("name"),
            account_id: row.get("account_id"),
            is_shared: row.get("is_shared"),
            num_columns: row.get("num_columns"),
            created_at: DateTime::parse_from_rfc3339(&created_at)?.with_timezone(&Utc),
        };

        Ok((dashboard, row.get("owner_login")))
    }
}
