use axum::Json;
use serde_json::{json, Value};

use crate::resources;

/// GET / - service description and the resource endpoints it serves
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    let endpoints: Vec<Value> = resources::ALL
        .iter()
        .map(|spec| {
            let mut routes = vec![format!("/api/{}", spec.path), format!("/api/{}/:id", spec.path)];
            if spec.plan_scoped {
                routes.push(format!("/api/{}/plan/:planId", spec.path));
            }
            json!({ "resource": spec.path, "routes": routes })
        })
        .collect();

    Json(json!({
        "success": true,
        "data": {
            "name": "Thesis Tracker API",
            "version": version,
            "description": "Research plan tracking backend built with Rust (Axum)",
            "health": ["/health", "/api/health"],
            "endpoints": endpoints
        }
    }))
}
