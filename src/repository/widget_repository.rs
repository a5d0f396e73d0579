use crate::domain::widget::Widget;
use anyhow::Result;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::sync::Arc;

#[derive(Clone)]
pub struct WidgetRepository {
    pool: Arc<SqlitePool>,
}

impl WidgetRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, widget: &Widget) -> Result<Widget> {
        let result = sqlx::query(
            r#"
            INSERT INTO widgets (dashboard_id, account_id, navlet, col, display_order, preferences)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(widget.dashboard_id)
        .bind(widget.account_id)
        .bind(&widget.navlet)
        .bind(widget.column)
        .bind(widget.order)
        .bind(serde_json::to_string(&widget.preferences)?)
        .execute(self.pool.as_ref())
        .await?;

        let mut created = widget.clone();
        created.id = result.last_insert_rowid();
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Widget>> {
        let row = sqlx::query(
            r#"
            SELECT id, dashboard_id, account_id, navlet, col, display_order, preferences
            FROM widgets
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(|row| self.row_to_widget(row)).transpose()
    }

    pub async fn list_for_dashboard(&self, dashboard_id: i64) -> Result<Vec<Widget>> {
        let rows = sqlx::query(
            r#"
            SELECT id, dashboard_id, account_id, navlet, col, display_order, preferences
            FROM widgets
            WHERE dashboard_id = ?
            ORDER BY col, display_order, id
            "#,
        )
        .bind(dashboard_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(|row| self.row_to_widget(row)).collect()
    }

    pub async fn count_for_dashboard(&self, dashboard_id: i64) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM widgets WHERE dashboard_id = ?")
            .bind(dashboard_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    /// Moves a widget, scoped to its dashboard so foreign ids are no-ops.
    pub async fn update_position(
        &self,
        dashboard_id: i64,
        widget_id: i64,
        column: i64,
        order: i64,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE widgets SET col = ?, display_order = ? WHERE id = ? AND dashboard_id = ?",
        )
        .bind(column)
        .bind(order)
        .bind(widget_id)
        .bind(dashboard_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM widgets WHERE id = ?")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_widget(&self, row: SqliteRow) -> Result<Widget> {
        let preferences: String = row.get("preferences");
        Ok(Widget {
            id: row.get("id"),
            dashboard_id: row.get("dashboard_id"),
            account_id: row.get("account_id"),
            navlet: row.get("navlet"),
            column: row.get("col"),
            order: row.get("display_order"),
            preferences: serde_json::from_str(&preferences)?,
        })
    }
}
