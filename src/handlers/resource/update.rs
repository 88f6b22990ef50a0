use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use crate::api::{ApiResponse, ApiResult};
use crate::database::query_builder;
use crate::error::ApiError;

use super::utils::{column_values, parse_id, payload_object};
use super::ResourceState;

/// PUT /api/<resource>/:id - overwrite every writable column of one row
pub async fn update(
    State(state): State<ResourceState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<()> {
    let spec = state.spec;
    let id = parse_id(&id)?;
    let payload = payload_object(body)?;
    let values = column_values(spec, payload)?;
    let stmt = query_builder::update(spec, id, values);

    let affected = state
        .db
        .execute(&stmt)
        .await
        .map_err(|e| ApiError::from_database(e, spec))?;

    if affected == 0 {
        return Err(ApiError::not_found(spec.messages.not_found));
    }

    tracing::info!(resource = spec.path, id, "updated record");
    Ok(ApiResponse::message(spec.messages.updated))
}
