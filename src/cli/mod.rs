pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "h4c")]
#[command(about = "h4c - Administrative tasks for the Hack4Change API database")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create all tables that do not exist yet")]
    Migrate,

    #[command(about = "Drop one application table and everything depending on it")]
    Drop {
        #[arg(help = "Table name (users, socials, projects, folders, files, skills, submissions)")]
        table: String,

        #[arg(long, help = "Confirm the drop")]
        yes: bool,
    },

    #[command(about = "Check that the configured database is reachable")]
    Health,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = AppConfig::from_env();

    match cli.command {
        Commands::Migrate => commands::migrate::handle(&config, output_format).await,
        Commands::Drop { table, yes } => commands::drop::handle(&config, &table, yes, output_format).await,
        Commands::Health => commands::health::handle(&config, output_format).await,
    }
}
