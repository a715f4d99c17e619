//! Response bodies for the HTTP API.
use serde::{Deserialize, Serialize};

use crate::wallpaper::translator::GeneratedWallpaper;

pub const SUCCESS_MESSAGE: &str = "Wallpaper generated successfully";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateWallpaperResponse {
    pub success: bool,
    pub image_url: String,
    pub prompt_used: String,
    pub user_id: Option<String>,
    pub generation_time: String,
    pub message: String,
}

impl From<GeneratedWallpaper> for GenerateWallpaperResponse {
    fn from(w: GeneratedWallpaper) -> Self {
        GenerateWallpaperResponse {
            success: true,
            image_url: w.image_url,
            prompt_used: w.prompt_used,
            user_id: w.user_id,
            generation_time: w.generation_time.to_rfc3339(),
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        HealthResponse {
            status: "OK".to_string(),
            message: "AI Wallpaper Generator API is running".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
