//! Request validation and upstream translation for wallpaper generation.
pub mod request;
pub mod response;
pub mod translator;

pub use request::{GenerateWallpaperBody, WallpaperRequest};
pub use response::{GenerateWallpaperResponse, HealthResponse};
pub use translator::{GeneratedWallpaper, WallpaperResult, WallpaperTranslator};
