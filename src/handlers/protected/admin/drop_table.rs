use axum::extract::{Extension, Path, State};
use serde_json::{json, Value};

use crate::database::Table;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /delete/:name - Drop one of the application's tables
///
/// Only names in the fixed table list are accepted. Disabled unless
/// `API_ALLOW_TABLE_DROP` is set (on by default in development only).
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(name): Path<String>,
) -> ApiResult<Value> {
    if !state.config.api.allow_table_drop {
        tracing::warn!("User {} tried to drop '{}' while drops are disabled", user.user_id, name);
        return Err(ApiError::forbidden("Table drop is disabled"));
    }

    let table: Table = name
        .parse()
        .map_err(|e: crate::database::schema::UnknownTable| ApiError::bad_request(e.to_string()))?;

    state.gateway.drop_table(table).await?;
    tracing::warn!("User {} dropped table {}", user.user_id, table);

    Ok(ApiResponse::success(json!({
        "message": format!("Table {} dropped", table),
        "table": table.as_str(),
    })))
}
