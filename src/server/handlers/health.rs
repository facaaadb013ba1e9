use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::server::app::AppState;

/// Liveness plus a round trip to the store
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.app.db().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "service": "crm-graphql",
                "version": env!("CARGO_PKG_VERSION")
            })),
        ),
        Err(err) => {
            tracing::warn!("Health check failed to reach the database: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "service": "crm-graphql",
                    "version": env!("CARGO_PKG_VERSION")
                })),
            )
        }
    }
}
