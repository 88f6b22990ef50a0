use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::Database;
use crate::error::ApiError;
use crate::handlers::{
    self,
    resource::{
        resource_by_plan, resource_create, resource_delete, resource_list, resource_show,
        resource_update, ResourceState,
    },
};
use crate::resources::{self, ResourceSpec};

/// State for the service-level routes
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

/// The full route table: service endpoints, one nested CRUD router per resource,
/// and the uniform not-found / panic answers.
pub fn app(db: Database, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/health", get(handlers::health))
        .with_state(AppState { db: db.clone() });

    for spec in resources::ALL.iter().copied() {
        router = router.nest(&format!("/api/{}", spec.path), resource_routes(db.clone(), spec));
    }

    router
        .fallback(handlers::route_not_found)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(&config.security))
        .layer(TraceLayer::new_for_http())
}

fn resource_routes(db: Database, spec: &'static ResourceSpec) -> Router {
    let mut router = Router::new()
        .route(
            "/",
            get(resource_list)
                .post(resource_create)
                .fallback(handlers::route_not_found),
        )
        .route(
            "/:id",
            get(resource_show)
                .put(resource_update)
                .delete(resource_delete)
                .fallback(handlers::route_not_found),
        );

    if spec.plan_scoped {
        router = router.route(
            "/plan/:plan_id",
            get(resource_by_plan).fallback(handlers::route_not_found),
        );
    }

    router.with_state(ResourceState { db, spec })
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!("unhandled error in request handler: {}", detail);
    ApiError::internal_server_error().into_response()
}
