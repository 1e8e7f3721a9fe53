use attendance_core::models::response::ApiResponse;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::ApiState;

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    timezone: String,
}

#[derive(Serialize)]
struct VersionInfo {
    version: &'static str,
}

async fn health_check(State(state): State<Arc<ApiState>>) -> Json<ApiResponse<HealthStatus>> {
    let status = HealthStatus {
        status: "ok",
        timezone: state.services.attendance.calendar().timezone().name().to_string(),
    };
    Json(ApiResponse::success(200, "Service is healthy", Some(status)))
}

async fn version() -> Json<ApiResponse<VersionInfo>> {
    Json(ApiResponse::success(
        200,
        "Service version",
        Some(VersionInfo {
            version: env!("CARGO_PKG_VERSION"),
        }),
    ))
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}
