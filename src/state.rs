use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, Gateway};
use crate::services::SkillGenerator;

/// Everything a handler may depend on, built once at startup and cloned
/// into each request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gateway: Arc<dyn Gateway>,
    pub tokens: TokenService,
    /// `None` when no generator URL is configured.
    pub generator: Option<SkillGenerator>,
}

impl AppState {
    pub fn new(config: AppConfig, gateway: Arc<dyn Gateway>) -> anyhow::Result<Self> {
        let tokens = TokenService::new(
            &config.security.jwt_secret,
            config.security.jwt_expiry_hours,
        );
        if !tokens.is_configured() {
            tracing::warn!("JWT_SECRET is empty; registration and login will fail");
        }

        let generator = SkillGenerator::from_config(&config.academy)?;
        match &generator {
            Some(generator) => tracing::info!("Skill generator at {}", generator.url()),
            None => tracing::info!("Skill generator not configured; /user/academy/generate disabled"),
        }

        Ok(Self {
            config: Arc::new(config),
            gateway,
            tokens,
            generator,
        })
    }

    /// Opens the configured store and builds the state around it.
    pub async fn connect(config: AppConfig) -> anyhow::Result<Self> {
        let gateway = DatabaseManager::connect(&config.database).await?;
        gateway.create_tables().await?;
        Self::new(config, gateway)
    }
}
