//! Shared state and router assembly.
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::api::rate_limit::{rate_limit, RateLimiter};
use crate::config::Config;
use crate::error::AppResult;
use crate::upstream::ImageApiClient;
use crate::wallpaper::WallpaperTranslator;

pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub struct AppState {
    pub translator: WallpaperTranslator,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(translator: WallpaperTranslator, rate_limiter: RateLimiter) -> Self {
        AppState { translator, rate_limiter }
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = ImageApiClient::from_config(config)?;
        Ok(AppState::new(
            WallpaperTranslator::new(client),
            RateLimiter::new(config.rate_limit_max, config.rate_limit_window),
        ))
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/v1/generate-wallpaper", post(handlers::generate_wallpaper))
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .route("/", get(handlers::health))
        .nest("/api", api)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
