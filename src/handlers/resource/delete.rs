use axum::extract::{Path, State};

use crate::api::{ApiResponse, ApiResult};
use crate::database::query_builder;
use crate::error::ApiError;

use super::utils::parse_id;
use super::ResourceState;

/// DELETE /api/<resource>/:id
pub async fn delete(State(state): State<ResourceState>, Path(id): Path<String>) -> ApiResult<()> {
    let spec = state.spec;
    let id = parse_id(&id)?;
    let stmt = query_builder::delete(spec, id);

    let affected = state
        .db
        .execute(&stmt)
        .await
        .map_err(|e| ApiError::from_database(e, spec))?;

    if affected == 0 {
        return Err(ApiError::not_found(spec.messages.not_found));
    }

    tracing::info!(resource = spec.path, id, "deleted record");
    Ok(ApiResponse::message(spec.messages.deleted))
}
