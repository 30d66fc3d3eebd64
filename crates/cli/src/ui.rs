use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;
use std::sync::Arc;
use template_core::CoreService;

#[derive(RustEmbed)]
#[folder = "ui/dist"]
struct UiAssets;

/// Serve the embedded single-page client. Static files and the SPA fallback
/// are only exposed in production; elsewhere unmatched routes are plain 404s.
/// `/api/*` paths never fall back to the UI.
pub async fn serve_ui(State(service): State<Arc<CoreService>>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if path.starts_with("api/") || !service.config().environment.is_production() {
        return StatusCode::NOT_FOUND.into_response();
    }

    if let Some(content) = UiAssets::get(path) {
        return serve_file(path, content.data.as_ref());
    }

    // SPA routing: any other path gets the entry point
    if let Some(content) = UiAssets::get("index.html") {
        return serve_file("index.html", content.data.as_ref());
    }

    StatusCode::NOT_FOUND.into_response()
}

fn serve_file(path: &str, content: &[u8]) -> Response {
    let mime_type = mime_guess::from_path(path).first_or_octet_stream();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime_type.as_ref())],
        content.to_vec(),
    )
        .into_response()
}
