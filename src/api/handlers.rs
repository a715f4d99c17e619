//! Axum request handlers for the HTTP API.
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use crate::api::routes::AppState;
use crate::error::{ErrorBody, ErrorCode, WallpaperError};
use crate::wallpaper::{GenerateWallpaperBody, GenerateWallpaperResponse, HealthResponse, WallpaperRequest};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

pub async fn generate_wallpaper(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateWallpaperBody>, JsonRejection>,
) -> Result<Json<GenerateWallpaperResponse>, WallpaperError> {
    let request_id = Uuid::new_v4();

    let Json(body) = payload.map_err(|rejection| {
        tracing::warn!(%request_id, "Rejected request body: {}", rejection);
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            WallpaperError::PayloadTooLarge
        } else {
            WallpaperError::InvalidPrompt
        }
    })?;

    let request = WallpaperRequest::try_from(body).map_err(|e| {
        tracing::warn!(%request_id, code = %e.code(), "Prompt validation failed");
        e
    })?;

    tracing::info!(
        %request_id,
        user_id = request.user_id.as_deref().unwrap_or("-"),
        app_version = request.app_version.as_deref().unwrap_or("-"),
        "Generating wallpaper for prompt: {:.50}",
        request.prompt()
    );

    match state.translator.generate(&request).await {
        Ok(wallpaper) => {
            tracing::info!(%request_id, image_url = %wallpaper.image_url, "Wallpaper generated");
            Ok(Json(wallpaper.into()))
        }
        Err(e) => {
            tracing::error!(%request_id, code = %e.code(), "Wallpaper generation failed: {}", e);
            Err(e)
        }
    }
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new("Endpoint not found", ErrorCode::NotFound)),
    )
}
