//! Per-address sliding-window rate limiting for the `/api` routes.
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::routes::AppState;
use crate::error::{ErrorBody, ErrorCode};

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// Tracked addresses above which a request also sweeps idle ones.
const SWEEP_THRESHOLD: usize = 1024;

/// Sliding-window limiter keyed by client address.
pub struct RateLimiter {
    clients: Mutex<HashMap<String, Vec<Instant>>>,
    max_per_window: usize,
    window: Duration,
    sweep_threshold: usize,
}

impl RateLimiter {
    pub fn new(max_per_window: usize, window: Duration) -> Self {
        RateLimiter {
            clients: Mutex::new(HashMap::new()),
            max_per_window,
            window,
            sweep_threshold: SWEEP_THRESHOLD,
        }
    }

    /// Record a request for `key` if it is within the limit.
    ///
    /// On rejection returns how long until the oldest request in the window
    /// expires. Rejected requests are not recorded.
    pub fn try_acquire(&self, key: &str) -> Result<(), Duration> {
        self.try_acquire_at(key, Instant::now())
    }

    fn try_acquire_at(&self, key: &str, now: Instant) -> Result<(), Duration> {
        let mut clients = self.clients.lock().unwrap_or_else(|e| e.into_inner());
        let window = self.window;
        if clients.len() > self.sweep_threshold {
            // Drop addresses whose whole history has aged out.
            clients.retain(|_, stamps| {
                stamps.retain(|&t| now.duration_since(t) < window);
                !stamps.is_empty()
            });
        }

        let stamps = clients.entry(key.to_string()).or_default();
        stamps.retain(|&t| now.duration_since(t) < window);
        if stamps.len() >= self.max_per_window {
            let oldest = stamps.first().copied().unwrap_or(now);
            return Err(window.saturating_sub(now.duration_since(oldest)));
        }
        stamps.push(now);
        Ok(())
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.clients.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

fn client_key<B>(req: &Request<B>) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit<B>(
    State(state): State<Arc<AppState>>,
    req: Request<B>,
    next: Next<B>,
) -> Response {
    let key = client_key(&req);
    match state.rate_limiter.try_acquire(&key) {
        Ok(()) => next.run(req).await,
        Err(retry_after) => {
            tracing::warn!("Rate limit exceeded for {}", key);
            let body = ErrorBody::new(RATE_LIMIT_MESSAGE, ErrorCode::RateLimitExceeded);
            let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
            let secs = retry_after.as_secs().max(1);
            if let Ok(v) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, v);
            }
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_max_then_rejects() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        for _ in 0..3 {
            assert!(limiter.try_acquire("1.2.3.4").is_ok());
        }
        let retry = limiter.try_acquire("1.2.3.4").unwrap_err();
        assert!(retry <= Duration::from_secs(60));
        assert!(limiter.try_acquire("5.6.7.8").is_ok());
    }

    #[test]
    fn window_slides() {
        let limiter = RateLimiter::new(2, Duration::from_secs(10));
        let t0 = Instant::now();
        assert!(limiter.try_acquire_at("a", t0).is_ok());
        assert!(limiter.try_acquire_at("a", t0 + Duration::from_secs(5)).is_ok());
        let retry = limiter.try_acquire_at("a", t0 + Duration::from_secs(6)).unwrap_err();
        assert_eq!(retry, Duration::from_secs(4));
        // First request has aged out, second is still inside the window.
        assert!(limiter.try_acquire_at("a", t0 + Duration::from_secs(10)).is_ok());
        assert!(limiter.try_acquire_at("a", t0 + Duration::from_secs(11)).is_err());
    }

    #[test]
    fn idle_clients_kept_until_threshold() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(1));
        limiter.sweep_threshold = 2;
        let t0 = Instant::now();
        limiter.try_acquire_at("a", t0).unwrap();
        limiter.try_acquire_at("b", t0).unwrap();
        // At the threshold: only the touched key is pruned.
        let later = t0 + Duration::from_secs(2);
        limiter.try_acquire_at("c", later).unwrap();
        assert_eq!(limiter.tracked_clients(), 3);
        // Above it: idle addresses are swept.
        limiter.try_acquire_at("d", later).unwrap();
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn touched_key_is_pruned_without_sweep() {
        let limiter = RateLimiter::new(1, Duration::from_secs(1));
        let t0 = Instant::now();
        limiter.try_acquire_at("a", t0).unwrap();
        assert!(limiter.try_acquire_at("a", t0 + Duration::from_millis(500)).is_err());
        assert!(limiter.try_acquire_at("a", t0 + Duration::from_secs(1)).is_ok());
        assert_eq!(limiter.tracked_clients(), 1);
    }
}
