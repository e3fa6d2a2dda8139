//! Rate Limiting Infrastructure
//!
//! Fixed-window request counting keyed by scope and client IP, plus the
//! axum middleware that rejects over-limit callers with 429.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use kernel::error::app_error::AppError;

use crate::client::extract_client_ip;

/// Entries are swept once the map grows past this many keys.
const PRUNE_THRESHOLD: usize = 1024;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX)
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

impl RateLimitResult {
    /// Whole seconds until the window resets, never less than one
    pub fn retry_after_secs(&self, now_ms: i64) -> u64 {
        let remaining_ms = (self.reset_at_ms - now_ms).max(0) as u64;
        remaining_ms.div_ceil(1000).max(1)
    }
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check and increment rate limit counter
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at_ms: i64,
    count: u32,
}

/// Process-local fixed-window counters
///
/// Counts are per process; a multi-instance deployment needs a shared store
/// behind the same trait.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    windows: Mutex<HashMap<String, Window>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_at(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now_ms: i64,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        let window_ms = config.window_ms();
        let mut windows = self
            .windows
            .lock()
            .map_err(|_| "rate limit store lock poisoned")?;

        if windows.len() > PRUNE_THRESHOLD {
            windows.retain(|_, w| now_ms - w.started_at_ms < window_ms);
        }

        let window = windows.entry(key.to_string()).or_insert(Window {
            started_at_ms: now_ms,
            count: 0,
        });
        if now_ms - window.started_at_ms >= window_ms {
            *window = Window {
                started_at_ms: now_ms,
                count: 0,
            };
        }

        let allowed = window.count < config.max_requests;
        if allowed {
            window.count += 1;
        }

        Ok(RateLimitResult {
            allowed,
            remaining: config.max_requests.saturating_sub(window.count),
            reset_at_ms: window.started_at_ms + window_ms,
        })
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        self.check_at(key, config, Utc::now().timestamp_millis())
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Middleware state: one limiter per scope (`general`, `auth`)
pub struct RateLimiter<S> {
    pub store: Arc<S>,
    pub config: RateLimitConfig,
    pub scope: &'static str,
    pub message: &'static str,
}

impl<S> Clone for RateLimiter<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
            scope: self.scope,
            message: self.message,
        }
    }
}

impl<S> RateLimiter<S> {
    pub fn new(
        store: Arc<S>,
        config: RateLimitConfig,
        scope: &'static str,
        message: &'static str,
    ) -> Self {
        Self {
            store,
            config,
            scope,
            message,
        }
    }
}

/// Reject callers that exceeded the window with 429 and `Retry-After`
///
/// Store failures are logged and the request passes through.
pub async fn enforce_rate_limit<S>(
    State(limiter): State<RateLimiter<S>>,
    req: Request<Body>,
    next: Next,
) -> Response
where
    S: RateLimitStore + Sync + 'static,
{
    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());
    let client_ip = extract_client_ip(req.headers(), direct_ip);
    let key = rate_limit_key(limiter.scope, client_ip);

    match limiter.store.check_and_increment(&key, &limiter.config).await {
        Ok(result) if !result.allowed => {
            let retry_after = result.retry_after_secs(Utc::now().timestamp_millis());
            tracing::warn!(scope = limiter.scope, key = %key, retry_after, "Rate limit exceeded");
            AppError::too_many_requests(limiter.message)
                .with_retry_after(retry_after)
                .into_response()
        }
        Ok(_) => next.run(req).await,
        Err(e) => {
            tracing::warn!(scope = limiter.scope, error = %e, "Rate limit check failed, allowing request");
            next.run(req).await
        }
    }
}

fn rate_limit_key(scope: &str, ip: Option<IpAddr>) -> String {
    match ip {
        Some(ip) => format!("{}:{}", scope, ip),
        None => format!("{}:unknown", scope),
    }
}
