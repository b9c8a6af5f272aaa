use serde_json::json;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;
use crate::database::{DatabaseManager, Table};

pub async fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let gateway = DatabaseManager::connect(&config.database).await?;
    gateway.create_tables().await?;

    let tables: Vec<&str> = Table::ALL.iter().map(|t| t.as_str()).collect();
    output_success(
        output_format,
        &format!("Ensured {} tables in {}", tables.len(), config.database.name),
        Some(json!({ "tables": tables })),
    )
}
