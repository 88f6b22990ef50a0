use axum::extract::{Path, State};
use serde_json::Value;

use crate::api::{ApiResponse, ApiResult};
use crate::database::query_builder;
use crate::error::ApiError;

use super::utils::parse_id;
use super::ResourceState;

/// GET /api/<resource>/plan/:planId - rows attached to one plan. An empty list is
/// a valid answer, including for plans that do not exist.
pub async fn by_plan(State(state): State<ResourceState>, Path(plan_id): Path<String>) -> ApiResult<Vec<Value>> {
    let spec = state.spec;
    let plan_id = parse_id(&plan_id)?;
    let stmt = query_builder::select_by_plan(spec, plan_id);

    let rows = state
        .db
        .fetch_all(&stmt)
        .await
        .map_err(|e| ApiError::from_database(e, spec))?;

    Ok(ApiResponse::success(rows))
}
