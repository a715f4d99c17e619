//! Env-driven configuration for the relay and the CLI.
//!
//! Values are read from the process environment once at startup; `dotenv` is
//! loaded on demand by the binaries. Everything except the upstream API key
//! has a default.
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_IMAGE_API_URL: &str = "https://api.aimlapi.com/v1/images/generations";
pub const DEFAULT_IMAGE_MODEL: &str = "flux/schnell";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_RATE_LIMIT_MAX: usize = 10;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_host: IpAddr,
    pub port: u16,
    pub image_api_url: String,
    pub image_api_key: String,
    pub image_model: String,
    pub upstream_timeout: Duration,
    pub rate_limit_max: usize,
    pub rate_limit_window: Duration,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> AppResult<Self> {
        let image_api_key = env::var("IMAGE_API_KEY").unwrap_or_default();
        if image_api_key.trim().is_empty() {
            return Err(AppError::Config("IMAGE_API_KEY must be set".to_string()));
        }

        Ok(Config {
            api_host: parse_or("API_HOST", IpAddr::from([0, 0, 0, 0])),
            port: parse_or("PORT", DEFAULT_PORT),
            image_api_url: env::var("IMAGE_API_URL").unwrap_or_else(|_| DEFAULT_IMAGE_API_URL.to_string()),
            image_api_key,
            image_model: env::var("IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
            upstream_timeout: Duration::from_secs(parse_or("UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS)),
            rate_limit_max: parse_or("RATE_LIMIT_MAX", DEFAULT_RATE_LIMIT_MAX),
            rate_limit_window: Duration::from_secs(parse_or("RATE_LIMIT_WINDOW_SECS", DEFAULT_RATE_LIMIT_WINDOW_SECS)),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.api_host, self.port)
    }

    pub fn log_summary(&self) {
        tracing::info!("API_HOST: {}", self.api_host);
        tracing::info!("PORT: {}", self.port);
        tracing::info!("IMAGE_API_URL: {}", self.image_api_url);
        tracing::info!("IMAGE_API_KEY: {}", mask(&self.image_api_key));
        tracing::info!("IMAGE_MODEL: {}", self.image_model);
        tracing::info!("UPSTREAM_TIMEOUT_SECS: {}", self.upstream_timeout.as_secs());
        tracing::info!(
            "RATE_LIMIT: {} requests / {}s",
            self.rate_limit_max,
            self.rate_limit_window.as_secs()
        );
    }
}

fn parse_or<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} '{}', falling back to {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        "<unset>".to_string()
    } else {
        format!("<set, {} chars>", secret.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_never_reveals_key_characters() {
        assert_eq!(mask("sk-abcdef"), "<set, 9 chars>");
        assert_eq!(mask("abcd"), "<set, 4 chars>");
        assert_eq!(mask(""), "<unset>");
        for key in ["sk-abcdef", "abcd", "x"] {
            assert!(!mask(key).contains(key));
        }
    }
}
