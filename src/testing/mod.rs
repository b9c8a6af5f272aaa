use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::database::MemoryGateway;
use crate::state::AppState;

pub const TEST_SECRET: &str = "test-secret";

/// Development preset over the in-memory store with a fixed signing secret.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.database.backend = StoreBackend::Memory;
    config.security.jwt_secret = TEST_SECRET.to_string();
    config
}

pub fn test_state() -> AppState {
    AppState::new(test_config(), Arc::new(MemoryGateway::new()))
        .expect("test state should build without a generator")
}
