use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    store: &'static str,
    version: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let store_status = match state.gateway.ping().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::error!("Health check failed: City info store unreachable: {}", e);
            "down"
        }
    };

    let status = if store_status == "up" {
        "healthy"
    } else {
        "unhealthy"
    };

    let response = HealthResponse {
        status,
        store: store_status,
        version: env!("CARGO_PKG_VERSION"),
    };

    let code = if status == "healthy" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(response))
}
