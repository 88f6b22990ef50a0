use axum::extract::{Path, State};
use serde_json::Value;

use crate::api::{ApiResponse, ApiResult};
use crate::database::query_builder;
use crate::error::ApiError;

use super::utils::parse_id;
use super::ResourceState;

/// GET /api/<resource>/:id - a single row, 404 when the id matches nothing
pub async fn show(State(state): State<ResourceState>, Path(id): Path<String>) -> ApiResult<Value> {
    let spec = state.spec;
    let id = parse_id(&id)?;
    let stmt = query_builder::select_by_id(spec, id);

    let row = state
        .db
        .fetch_optional(&stmt)
        .await
        .map_err(|e| ApiError::from_database(e, spec))?
        .ok_or_else(|| ApiError::not_found(spec.messages.not_found))?;

    Ok(ApiResponse::success(row))
}
