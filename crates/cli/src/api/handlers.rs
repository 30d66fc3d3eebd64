use super::ErrorResponse;
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use template_core::CoreService;

/// Return the application configuration
pub async fn get_config(State(service): State<Arc<CoreService>>) -> impl IntoResponse {
    Json(service.config().clone())
}

#[derive(Debug, Deserialize)]
pub struct GreetRequest {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GreetResponse {
    message: String,
}

/// Greet the caller by name; absent or empty names are a 400
pub async fn greet(
    State(service): State<Arc<CoreService>>,
    Json(req): Json<GreetRequest>,
) -> Result<Json<GreetResponse>, ErrorResponse> {
    let name = req.name.as_deref().unwrap_or_default();
    let message = service
        .greet(name)
        .map_err(|e| ErrorResponse::new(e.to_string()))?;

    Ok(Json(GreetResponse { message }))
}
