use axum::http::{Method, Uri};

use crate::error::{ApiError, ROUTE_NOT_FOUND_MESSAGE};

/// Any path or method the route table does not know about
pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    tracing::debug!("no route for {} {}", method, uri.path());
    ApiError::not_found(ROUTE_NOT_FOUND_MESSAGE)
}
