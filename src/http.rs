use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::context::AppContext;
use crate::domain::action::GatewayRequest;
use crate::error::AppError;
use crate::workflow::gateway;

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route(
            "/api/jira",
            get(health).post(dispatch).options(preflight),
        )
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
    message: &'static str,
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        message: "trackgate is running",
    })
}

/// Preflight requests always succeed with an empty body; the CORS layer
/// attaches the allow headers.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn dispatch(State(ctx): State<Arc<AppContext>>, body: Bytes) -> Response {
    let request: GatewayRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": format!("invalid request body: {err}")})),
            )
                .into_response();
        }
    };

    match gateway::handle(&ctx, request).await {
        Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        Err(AppError::InvalidRequest(message)) => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": message}))).into_response()
        }
        Err(err) => {
            error!(error = %err, "unexpected gateway failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": err.to_string()})),
            )
                .into_response()
        }
    }
}
