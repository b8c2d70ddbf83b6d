//! Common utilities for service clients
//!
//! Shared HTTP client construction and the global request counters.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{header, Client};

use crate::dispatch::RequestOutcome;
use crate::error::{BridgeError, Result};

/// UserAgent structure for identifying the bridge to the backend
#[derive(Debug, Clone)]
pub struct UserAgent {
    /// Application name
    pub app_name: String,

    /// Version string
    pub version: String,

    /// Optional extra info
    pub extra: Option<String>,
}

impl Default for UserAgent {
    fn default() -> Self {
        Self {
            app_name: "AethelBridge".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            extra: Some("aethel-bridge-rs".to_string()),
        }
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.app_name, self.version)?;

        if let Some(ref extra) = self.extra {
            write!(f, " ({})", extra)?;
        }

        Ok(())
    }
}

/// Build a standard HTTP client for backend calls
///
/// When `timeout` is `None` the transport default is left untouched; the
/// bridge configures no timeout of its own.
pub fn build_http_client(user_agent: Option<UserAgent>, timeout: Option<Duration>) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    let ua = user_agent.unwrap_or_default().to_string();

    headers.insert(
        header::USER_AGENT,
        header::HeaderValue::from_str(&ua)
            .map_err(|e| BridgeError::configuration(format!("Invalid user agent: {}", e)))?,
    );

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .gzip(true);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| BridgeError::configuration(format!("Failed to build HTTP client: {}", e)))
}

/// Request counters shared by all bridge clients
#[derive(Debug, Default)]
struct BridgeMetrics {
    /// Total requests submitted
    request_count: AtomicU64,

    /// Completions with a 2xx status
    success_count: AtomicU64,

    /// Completions with a non-2xx status
    http_error_count: AtomicU64,

    /// Completions without a usable response
    transport_failure_count: AtomicU64,
}

/// Global counters for all bridge requests
static GLOBAL_METRICS: Lazy<BridgeMetrics> = Lazy::new(BridgeMetrics::default);

/// Record a request submission
pub fn record_request() {
    GLOBAL_METRICS.request_count.fetch_add(1, Ordering::Relaxed);
}

/// Record a completed request outcome
pub fn record_outcome(outcome: &RequestOutcome) {
    let counter = match outcome {
        RequestOutcome::Success { .. } => &GLOBAL_METRICS.success_count,
        RequestOutcome::HttpError { .. } => &GLOBAL_METRICS.http_error_count,
        RequestOutcome::TransportFailure(_) => &GLOBAL_METRICS.transport_failure_count,
    };
    counter.fetch_add(1, Ordering::Relaxed);
}

/// Get a snapshot of the global counters
pub fn metrics_snapshot() -> HashMap<String, u64> {
    let mut map = HashMap::new();

    map.insert(
        "request_count".to_string(),
        GLOBAL_METRICS.request_count.load(Ordering::Relaxed),
    );
    map.insert(
        "success_count".to_string(),
        GLOBAL_METRICS.success_count.load(Ordering::Relaxed),
    );
    map.insert(
        "http_error_count".to_string(),
        GLOBAL_METRICS.http_error_count.load(Ordering::Relaxed),
    );
    map.insert(
        "transport_failure_count".to_string(),
        GLOBAL_METRICS.transport_failure_count.load(Ordering::Relaxed),
    );

    map
}

/// Reset all counters
pub fn reset_metrics() {
    GLOBAL_METRICS.request_count.store(0, Ordering::Relaxed);
    GLOBAL_METRICS.success_count.store(0, Ordering::Relaxed);
    GLOBAL_METRICS.http_error_count.store(0, Ordering::Relaxed);
    GLOBAL_METRICS
        .transport_failure_count
        .store(0, Ordering::Relaxed);
}
