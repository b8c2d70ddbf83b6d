//! Request dispatch primitives
//!
//! Everything a fire-and-forget backend call produces lives here: the
//! per-request context carried into the completion log line, the outcome
//! taxonomy, the single completion handler, and the handle returned to
//! callers who want a synchronization point.

use chrono::{DateTime, Utc};
use log::{error, info};
use tokio::task::JoinHandle;

use crate::services::common::record_outcome;
use crate::util::{generate_request_id, truncate_for_log};

/// Longest response body fragment echoed into a log line
const LOG_BODY_MAX_CHARS: usize = 200;

/// Classified result of a single dispatched request
///
/// Purely informational: outcomes are logged once and discarded, they drive
/// no further state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// No usable response was received; no status code is available
    TransportFailure(String),

    /// A well-formed response with a status outside 200-299
    HttpError { status: u16, body: String },

    /// A well-formed response with a 2xx status
    Success { status: u16, body: String },
}

impl RequestOutcome {
    /// Classify a well-formed response by its status code
    pub fn from_status(status: u16, body: String) -> Self {
        if (200..300).contains(&status) {
            RequestOutcome::Success { status, body }
        } else {
            RequestOutcome::HttpError { status, body }
        }
    }

    /// Whether the request completed with a 2xx status
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success { .. })
    }

    /// The HTTP status code, when a response was received at all
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestOutcome::TransportFailure(_) => None,
            RequestOutcome::HttpError { status, .. } => Some(*status),
            RequestOutcome::Success { status, .. } => Some(*status),
        }
    }
}

/// Correlation data for one dispatched request
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request ID for log correlation
    pub request_id: String,

    /// Endpoint path the request targets
    pub endpoint: String,

    /// Submission timestamp
    pub started_at: DateTime<Utc>,
}

impl RequestContext {
    /// Create a context for a request about to be dispatched
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            request_id: generate_request_id(),
            endpoint: endpoint.into(),
            started_at: Utc::now(),
        }
    }

    fn elapsed_ms(&self) -> i64 {
        Utc::now()
            .signed_duration_since(self.started_at)
            .num_milliseconds()
    }
}

/// The single completion handler for dispatched requests
///
/// Invoked exactly once per request, on whatever runtime thread ran the
/// send. Successes log at info with status and a truncated body; failures
/// log at error, with the status only when one exists.
pub fn log_outcome(ctx: &RequestContext, outcome: &RequestOutcome) {
    match outcome {
        RequestOutcome::Success { status, body } => {
            info!(
                "aethel request {} to {} succeeded: status {} ({} ms) body: {}",
                ctx.request_id,
                ctx.endpoint,
                status,
                ctx.elapsed_ms(),
                truncate_for_log(body, LOG_BODY_MAX_CHARS)
            );
        }
        RequestOutcome::HttpError { status, body } => {
            error!(
                "aethel request {} to {} failed: status {} ({} ms) body: {}",
                ctx.request_id,
                ctx.endpoint,
                status,
                ctx.elapsed_ms(),
                truncate_for_log(body, LOG_BODY_MAX_CHARS)
            );
        }
        RequestOutcome::TransportFailure(reason) => {
            error!(
                "aethel request {} to {} failed: no response ({} ms): {}",
                ctx.request_id,
                ctx.endpoint,
                ctx.elapsed_ms(),
                reason
            );
        }
    }

    record_outcome(outcome);
}

/// Handle to a request already submitted to the runtime
///
/// Dropping the handle detaches the task; the request still completes and
/// its outcome is still logged. There is no cancellation path.
#[derive(Debug)]
pub struct DispatchHandle {
    inner: JoinHandle<RequestOutcome>,
}

impl DispatchHandle {
    pub(crate) fn new(inner: JoinHandle<RequestOutcome>) -> Self {
        Self { inner }
    }

    /// Whether the underlying task has already completed
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Wait for the request to complete and return its outcome
    ///
    /// A task that panicked or was torn down with the runtime surfaces as a
    /// `TransportFailure`.
    pub async fn await_outcome(self) -> RequestOutcome {
        match self.inner.await {
            Ok(outcome) => outcome,
            Err(err) => RequestOutcome::TransportFailure(format!("dispatch task failed: {}", err)),
        }
    }
}
