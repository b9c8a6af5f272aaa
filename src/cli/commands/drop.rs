use serde_json::json;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;
use crate::database::{DatabaseManager, Table};

pub async fn handle(
    config: &AppConfig,
    table: &str,
    confirmed: bool,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let table: Table = table.parse()?;
    if !confirmed {
        anyhow::bail!("refusing to drop '{}' without --yes", table);
    }

    let gateway = DatabaseManager::connect(&config.database).await?;
    gateway.drop_table(table).await?;

    output_success(
        output_format,
        &format!("Dropped table {}", table),
        Some(json!({ "table": table.as_str() })),
    )
}
