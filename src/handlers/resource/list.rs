use axum::extract::State;
use serde_json::Value;

use crate::api::{ApiResponse, ApiResult};
use crate::database::query_builder;
use crate::error::ApiError;

use super::ResourceState;

/// GET /api/<resource> - every row, with parent display columns
pub async fn list(State(state): State<ResourceState>) -> ApiResult<Vec<Value>> {
    let spec = state.spec;
    let stmt = query_builder::select_all(spec);

    let rows = state
        .db
        .fetch_all(&stmt)
        .await
        .map_err(|e| ApiError::from_database(e, spec))?;

    Ok(ApiResponse::success(rows))
}
