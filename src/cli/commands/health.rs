use serde_json::json;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let gateway = DatabaseManager::connect(&config.database).await?;
    gateway.ping().await?;

    output_success(
        output_format,
        "Database is reachable",
        Some(json!({
            "backend": config.database.backend,
            "database": config.database.name,
        })),
    )
}
