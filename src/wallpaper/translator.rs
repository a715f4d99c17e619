//! Upstream translation: augment, call once, extract, map failures.
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{UpstreamError, WallpaperError};
use crate::prompt::augment_prompt;
use crate::upstream::ImageApiClient;
use crate::wallpaper::request::WallpaperRequest;

/// Successful generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedWallpaper {
    pub image_url: String,
    pub prompt_used: String,
    pub user_id: Option<String>,
    pub generation_time: DateTime<Utc>,
}

pub type WallpaperResult = Result<GeneratedWallpaper, WallpaperError>;

#[derive(Clone)]
pub struct WallpaperTranslator {
    client: ImageApiClient,
}

impl WallpaperTranslator {
    pub fn new(client: ImageApiClient) -> Self {
        WallpaperTranslator { client }
    }

    /// Run one generation attempt. Never retries.
    pub async fn generate(&self, request: &WallpaperRequest) -> WallpaperResult {
        let prompt_used = augment_prompt(request.prompt());

        let payload = self.client.generate(&prompt_used).await.map_err(|e| {
            tracing::error!("Image generation call failed: {}", e);
            map_upstream_failure(&e)
        })?;

        let image_url = extract_image_url(&payload).ok_or_else(|| {
            tracing::warn!(
                "Upstream succeeded without an image reference, payload keys: {}",
                payload_keys(&payload)
            );
            WallpaperError::NoImageGenerated
        })?;

        Ok(GeneratedWallpaper {
            image_url,
            prompt_used,
            user_id: request.user_id.clone(),
            generation_time: Utc::now(),
        })
    }
}

/// Pull the first image URL out of either known payload shape:
/// `{"images": [{"url": ...}]}` first, then `{"output": ["..."]}`.
pub fn extract_image_url(payload: &Value) -> Option<String> {
    let from_images = payload
        .get("images")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|img| img.get("url"))
        .and_then(|u| u.as_str());
    let from_output = || {
        payload
            .get("output")
            .and_then(|v| v.as_array())
            .and_then(|arr| arr.first())
            .and_then(|u| u.as_str())
    };
    from_images.or_else(from_output).map(String::from)
}

const MAX_LOGGED_KEYS: usize = 16;

/// Bounded description of a payload for logs: top-level keys only.
fn payload_keys(payload: &Value) -> String {
    match payload.as_object() {
        Some(map) => {
            let mut keys: Vec<&str> = map.keys().take(MAX_LOGGED_KEYS).map(String::as_str).collect();
            if map.len() > MAX_LOGGED_KEYS {
                keys.push("...");
            }
            format!("[{}]", keys.join(", "))
        }
        None if payload.is_null() => "<null>".to_string(),
        None => "<not an object>".to_string(),
    }
}

/// Client-facing failure for an upstream status; `None` means no response
/// was received at all (timeout, connection error).
pub fn map_upstream_status(status: Option<StatusCode>) -> WallpaperError {
    match status {
        Some(StatusCode::UNAUTHORIZED) => WallpaperError::Auth,
        Some(StatusCode::TOO_MANY_REQUESTS) => WallpaperError::RateLimited,
        Some(StatusCode::BAD_REQUEST) => WallpaperError::InvalidRequest,
        _ => WallpaperError::Service,
    }
}

pub fn map_upstream_failure(err: &UpstreamError) -> WallpaperError {
    map_upstream_status(err.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn images_shape_wins() {
        let v = json!({"images": [{"url": "X"}], "output": ["Y"]});
        assert_eq!(extract_image_url(&v).as_deref(), Some("X"));
    }

    #[test]
    fn output_shape_is_the_fallback() {
        assert_eq!(extract_image_url(&json!({"output": ["Y", "Z"]})).as_deref(), Some("Y"));
        assert_eq!(
            extract_image_url(&json!({"images": [], "output": ["Y"]})).as_deref(),
            Some("Y")
        );
    }

    #[test]
    fn nothing_usable() {
        for v in [
            json!({}),
            json!({"images": []}),
            json!({"output": []}),
            json!({"images": [{"href": "x"}]}),
            json!({"output": [42]}),
            Value::Null,
        ] {
            assert_eq!(extract_image_url(&v), None, "payload {}", v);
        }
    }

    #[test]
    fn logged_payload_is_bounded_to_keys() {
        let big = "x".repeat(100_000);
        let v = json!({"images": [], "debug": big});
        let logged = payload_keys(&v);
        assert!(logged.len() < 64);
        assert!(logged.contains("images") && logged.contains("debug"));
        assert!(!logged.contains("xxx"));

        let many: serde_json::Map<String, Value> =
            (0..100).map(|i| (format!("k{:03}", i), Value::Null)).collect();
        let logged = payload_keys(&Value::Object(many));
        assert_eq!(logged.matches(", ").count(), MAX_LOGGED_KEYS);
        assert!(logged.ends_with("...]"));

        assert_eq!(payload_keys(&Value::Null), "<null>");
        assert_eq!(payload_keys(&json!(["a"])), "<not an object>");
    }

    #[test]
    fn status_table() {
        let cases = [
            (Some(StatusCode::UNAUTHORIZED), ErrorCode::AuthError, StatusCode::SERVICE_UNAVAILABLE),
            (Some(StatusCode::TOO_MANY_REQUESTS), ErrorCode::RateLimit, StatusCode::TOO_MANY_REQUESTS),
            (Some(StatusCode::BAD_REQUEST), ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST),
            (Some(StatusCode::FORBIDDEN), ErrorCode::ServiceError, StatusCode::INTERNAL_SERVER_ERROR),
            (Some(StatusCode::BAD_GATEWAY), ErrorCode::ServiceError, StatusCode::INTERNAL_SERVER_ERROR),
            (None, ErrorCode::ServiceError, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (upstream, code, status) in cases {
            let e = map_upstream_status(upstream);
            assert_eq!(e.code(), code, "upstream {:?}", upstream);
            assert_eq!(e.status(), status, "upstream {:?}", upstream);
        }
    }

    #[test]
    fn status_error_maps_through_its_code() {
        let e = UpstreamError::Status {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "slow down".to_string(),
        };
        assert_eq!(map_upstream_failure(&e), WallpaperError::RateLimited);
    }
}
