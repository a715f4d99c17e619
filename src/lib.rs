//! AI wallpaper relay library
//!
//! Modules:
//! - `api`: Axum handlers, rate limiting and router setup used by the binary.
//! - `upstream`: Thin client for the third-party image generation API.
//! - `prompt`: Fixed stylistic augmentation of user prompts.
//! - `wallpaper`: Prompt validation, upstream translation and response bodies.
//! - `config`: Env-driven configuration loader.
//! - `error`: Error types, client error codes and aliases.
//!
//! Re-exports are provided for common types: `Config`, `ImageApiClient`,
//! `WallpaperTranslator`, and `create_app`.
pub mod api;
pub mod config;
pub mod error;
pub mod prompt;
pub mod upstream;
pub mod wallpaper;

pub use api::{create_app, AppState};
pub use config::Config;
pub use upstream::client::ImageApiClient;
pub use wallpaper::translator::WallpaperTranslator;
