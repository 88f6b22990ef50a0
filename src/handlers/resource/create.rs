use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

use crate::api::{ApiResponse, ApiResult};
use crate::database::query_builder;
use crate::error::ApiError;

use super::utils::{column_values, payload_object};
use super::ResourceState;

/// POST /api/<resource> - insert a row and return its new id
pub async fn create(
    State(state): State<ResourceState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let spec = state.spec;
    let payload = payload_object(body)?;
    let values = column_values(spec, payload)?;
    let stmt = query_builder::insert(spec, values);

    let id = state
        .db
        .insert_returning_id(&stmt)
        .await
        .map_err(|e| ApiError::from_database(e, spec))?;

    tracing::info!(resource = spec.path, id, "created record");
    Ok(ApiResponse::created(json!({ "id": id })).with_message(spec.messages.created))
}
