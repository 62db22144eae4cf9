// HTTP entry point: POST /api/mapping around the dispatcher
use std::net::SocketAddr;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::dispatcher::{Dispatcher, MappingOutput};
use crate::error::MappingError;

// Request envelope. `data` may also be a string holding the JSON payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRequest {
    #[serde(alias = "Data")]
    pub data: Value,
    #[serde(alias = "SourceType")]
    pub source_type: String,
    #[serde(alias = "TargetType")]
    pub target_type: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub details: String,
}

pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/api/mapping", post(map_reservation))
        .route("/health", get(health_check))
        .fallback(not_found)
        .with_state(dispatcher)
}

pub async fn serve(dispatcher: Dispatcher, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Error running the API server")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, draining in-flight requests");
}

async fn map_reservation(State(dispatcher): State<Dispatcher>, body: Bytes) -> Response {
    let request: MappingRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected mapping request body: {}", e);
            return error_response("Invalid JSON format.", e.to_string());
        }
    };

    let result = match &request.data {
        Value::String(text) => dispatcher.map_str(text, &request.source_type, &request.target_type),
        data => dispatcher.map(data, &request.source_type, &request.target_type),
    };

    match result.and_then(MappingOutput::into_json) {
        Ok(mapped) => (StatusCode::OK, Json(mapped)).into_response(),
        Err(e) => {
            warn!(
                source_type = %request.source_type,
                target_type = %request.target_type,
                "Mapping failed: {}", e
            );
            let label = match e {
                MappingError::MalformedInput(_) => "Invalid JSON format.",
                _ => "Mapping error.",
            };
            error_response(label, e.to_string())
        }
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found." })),
    )
        .into_response()
}

fn error_response(error: &'static str, details: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error, details })).into_response()
}
