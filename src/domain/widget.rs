use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One navlet instance placed on a dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Widget {
    pub id: i64,
    pub dashboard_id: i64,
    pub account_id: i64,
    pub navlet: String, // e.g. "nav.web.navlets.status2.Status2Widget"
    pub column: i64,
    pub order: i64,
    pub preferences: Value,
}

impl Widget {
    pub fn new(dashboard_id: i64, account_id: i64, navlet: impl Into<String>) -> Self {
        Self {
            id: 0,
            dashboard_id,
            account_id,
            navlet: navlet.into(),
            column: 0,
            order: 0,
            preferences: Value::Object(Default::default()),
        }
    }

    pub fn with_position(mut self, column: i64, order: i64) -> Self {
        self.column = column;
        self.order = order;
        self
    }
}
