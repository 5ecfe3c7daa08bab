//! Health check endpoint

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
}

/// GET /health
///
/// Does NOT require authentication. Runs a trivial query against the pool so
/// a wedged database shows up as `degraded` instead of a false `ok`.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.db)
        .await
    {
        Ok(_) => "reachable",
        Err(e) => {
            warn!("Health check database query failed: {}", e);
            "unreachable"
        }
    };

    let status = if database == "reachable" {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        database: database.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
