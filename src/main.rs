use anyhow::{Context, Result};
use serde_json::json;
use std::sync::Arc;
use webfront::config::settings::{os_version, Settings, NAV_VERSION};
use webfront::config::webfront::WebfrontPaths;
use webfront::repository::{database, Repository};
use webfront::services::error_handling::UserErrorFormatter;
use webfront::services::DashboardService;
use webfront::utils::logging;

fn parse_id(arg: Option<String>, what: &str) -> Result<Option<i64>> {
    arg.map(|s| s.parse::<i64>().with_context(|| format!("invalid {}: {}", what, s)))
        .transpose()
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;
    logging::init(&settings.log_filter)?;
    tracing::info!(version = NAV_VERSION, os = %os_version(), "Starting webfront");

    let mut args = std::env::args().skip(1);
    let account_id = parse_id(args.next(), "account id")?
        .ok_or_else(|| anyhow::anyhow!("usage: webfront <account id> [dashboard id]"))?;
    let dashboard_id = parse_id(args.next(), "dashboard id")?;

    let pool = database::init_database(&settings.database_path).await?;
    let repository = Arc::new(Repository::new(pool));
    let service = DashboardService::new(repository.clone());

    let account = repository
        .accounts
        .get(account_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no account with id {}", account_id))?;

    let dashboard = match service.find_dashboard(&account, dashboard_id).await {
        Ok(view) => json!(view),
        Err(e) => json!({
            "status": e.status_code(),
            "message": UserErrorFormatter::format_for_ui(&e),
        }),
    };
    let dashboards = service.get_dashboards_for_account(&account).await?;
    let welcome = WebfrontPaths::discover().welcome_message(!account.is_anonymous())?;

    let output = json!({
        "account": account.login,
        "welcome": welcome,
        "dashboard": dashboard,
        "dashboards": dashboards,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
