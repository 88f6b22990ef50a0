use axum::{extract::rejection::JsonRejection, Json};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::resources::ResourceSpec;

/// Path ids are positive integers
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request(format!("ID inválido: {}", raw))),
    }
}

/// Unwrap a JSON body that must be an object
pub fn payload_object(body: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, ApiError> {
    match body? {
        Json(Value::Object(map)) => Ok(map),
        Json(_) => Err(ApiError::invalid_json("El cuerpo de la solicitud debe ser un objeto JSON")),
    }
}

/// Run the resource's payload hook, check required fields and produce one value
/// per writable column. Fails before any database work when a field is missing.
pub fn column_values(spec: &ResourceSpec, mut payload: Map<String, Value>) -> Result<Vec<Value>, ApiError> {
    if let Some(prepare) = spec.prepare {
        prepare(&mut payload);
    }

    let missing = spec.missing_required(&payload);
    if !missing.is_empty() {
        tracing::debug!(resource = spec.path, ?missing, "rejected payload with missing fields");
        return Err(ApiError::validation_error(spec.messages.required));
    }

    Ok(spec.column_values(&payload))
}
