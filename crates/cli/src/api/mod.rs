use crate::ui;
use anyhow::Result;
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use template_core::{util, CoreService};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod handlers;

/// Start the web server
pub async fn serve(addr: &str, service: CoreService) -> Result<()> {
    let app = create_router(Arc::new(service));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the API router
fn create_router(service: Arc<CoreService>) -> Router {
    Router::new()
        // API routes
        .route("/api/health", get(health_check))
        .route("/api/config", get(handlers::get_config))
        .route("/api/greet", post(handlers::greet))
        // UI routes (production only)
        .fallback(ui::serve_ui)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": util::format_timestamp(Utc::now()),
    }))
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}
