//! Aethel backend client implementation
//!
//! This module provides the request dispatcher for the Aethel service: it
//! builds `POST` requests against the resolved base URL, submits them to the
//! runtime without blocking the caller, and classifies each completion
//! exactly once.

mod models;
pub use models::*;

use std::time::Duration;

use log::debug;
use reqwest::{header, Client};
use serde::Serialize;

use crate::config::{normalize_base_url, BridgeConfig, EngineConfigSource, EnvSource};
use crate::core::ServiceClient;
use crate::dispatch::{log_outcome, DispatchHandle, RequestContext, RequestOutcome};
use crate::error::{BridgeError, Result};
use crate::services::common::{build_http_client, record_request, UserAgent};

/// Chat handshake endpoint path
pub const CHAT_ENDPOINT: &str = "/chat";

/// Unreal code generation endpoint path
pub const GENERATE_CODE_ENDPOINT: &str = "/aethel/generate-unreal-code";

/// Shader generation endpoint path
pub const GENERATE_SHADER_ENDPOINT: &str = "/aethel/generate-shader";

/// Aethel backend client
///
/// Holds the HTTP client and the normalized base URL; both are immutable
/// after construction. All operations are fire-and-forget: they submit the
/// request to the tokio runtime and return a [`DispatchHandle`] immediately,
/// so every method must be called from within a runtime.
pub struct AethelClient {
    /// HTTP client
    http_client: Client,

    /// Normalized backend base URL
    base_url: String,
}

impl AethelClient {
    /// Create a client from a bridge configuration
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        let timeout = config.timeout_seconds.map(Duration::from_secs);
        let http_client = build_http_client(Some(UserAgent::default()), timeout)?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(&config.base_url),
        })
    }

    /// Create a client by resolving the base URL from the given sources
    pub fn from_sources(env: &dyn EnvSource, config: &dyn EngineConfigSource) -> Result<Self> {
        Self::new(&BridgeConfig::from_sources(env, config))
    }

    /// Create a new builder for the Aethel client
    pub fn builder() -> AethelClientBuilder {
        AethelClientBuilder::default()
    }

    /// Submit a `POST {base_url}{path}` request and return immediately
    ///
    /// The target URL is plain concatenation: `path` must begin with `/`, and
    /// duplicate slashes are passed through untouched. The body is the JSON
    /// serialization of `payload` with `Content-Type: application/json`; no
    /// authentication header is ever attached. The spawned task classifies
    /// the response and runs the completion handler exactly once. A payload
    /// that fails to serialize never reaches the network and resolves to a
    /// [`RequestOutcome::TransportFailure`].
    pub fn dispatch<T>(&self, path: &str, payload: &T) -> DispatchHandle
    where
        T: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let ctx = RequestContext::new(path);
        let body = serde_json::to_string(payload)
            .map_err(|e| BridgeError::from(e).to_string());
        let client = self.http_client.clone();

        debug!("aethel request {} submitted: POST {}", ctx.request_id, url);
        record_request();

        let handle = tokio::spawn(async move {
            let outcome = match body {
                Ok(body) => send_request(&client, &url, body).await,
                Err(reason) => RequestOutcome::TransportFailure(reason),
            };
            log_outcome(&ctx, &outcome);
            outcome
        });

        DispatchHandle::new(handle)
    }

    /// Send the startup handshake message to `/chat`
    pub fn chat_handshake(&self, text: &str) -> DispatchHandle {
        self.dispatch(CHAT_ENDPOINT, &ChatRequest::handshake(text))
    }

    /// Request Unreal code generation
    pub fn generate_unreal_code(&self, prompt: &str) -> DispatchHandle {
        self.dispatch(
            GENERATE_CODE_ENDPOINT,
            &GenerateCodeRequest {
                prompt: prompt.to_string(),
            },
        )
    }

    /// Request shader generation
    pub fn generate_shader(&self, prompt: &str) -> DispatchHandle {
        self.dispatch(
            GENERATE_SHADER_ENDPOINT,
            &GenerateShaderRequest {
                prompt: prompt.to_string(),
            },
        )
    }

    /// Physics optimization hook
    ///
    /// No backend endpoint exists for this yet. The error return lets
    /// callers distinguish "not available" from "ran and did nothing".
    pub fn optimize_physics(&self) -> Result<()> {
        Err(BridgeError::not_implemented(
            "physics optimization has no backend endpoint; no request was sent",
        ))
    }
}

impl ServiceClient for AethelClient {
    fn name(&self) -> &str {
        "aethel"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Perform the network send and classify the result
async fn send_request(client: &Client, url: &str, body: String) -> RequestOutcome {
    let result = client
        .post(url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await;

    match result {
        Ok(response) => {
            let status = response.status().as_u16();
            match response.text().await {
                Ok(body) => RequestOutcome::from_status(status, body),
                Err(e) => RequestOutcome::TransportFailure(format!(
                    "failed to read response body: {}",
                    e
                )),
            }
        }
        Err(e) => RequestOutcome::TransportFailure(e.to_string()),
    }
}

/// Builder for the Aethel client
#[derive(Debug, Default)]
pub struct AethelClientBuilder {
    /// Base URL for the backend
    base_url: Option<String>,

    /// Request timeout in seconds
    timeout_seconds: Option<u64>,

    /// Startup call selection carried into the built configuration
    startup_calls: Option<crate::config::StartupCalls>,
}

impl AethelClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL (normalized on build)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the timeout in seconds
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Set the startup call selection
    pub fn startup_calls(mut self, startup_calls: crate::config::StartupCalls) -> Self {
        self.startup_calls = Some(startup_calls);
        self
    }

    /// Resolve the builder into a configuration
    pub fn into_config(self) -> BridgeConfig {
        let mut config = BridgeConfig::from_process_env();

        if let Some(base_url) = self.base_url {
            config.base_url = normalize_base_url(&base_url);
        }

        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = Some(timeout);
        }

        if let Some(startup_calls) = self.startup_calls {
            config.startup_calls = startup_calls;
        }

        config
    }

    /// Build the Aethel client
    pub fn build(self) -> Result<AethelClient> {
        AethelClient::new(&self.into_config())
    }
}
