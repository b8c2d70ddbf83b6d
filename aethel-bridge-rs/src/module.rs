//! Engine module wiring
//!
//! `AethelBridgeModule` is the piece the host engine owns: it resolves the
//! backend configuration, builds the client, and fires the configured
//! startup calls without blocking module initialization. An unreachable
//! backend never prevents the host from finishing startup; failures surface
//! only as log entries.

use futures::future::join_all;
use log::{error, info, warn};

use crate::config::{BridgeConfig, EngineConfigSource, EnvSource, StartupCalls};
use crate::core::EngineModule;
use crate::dispatch::{DispatchHandle, RequestOutcome};
use crate::services::aethel::AethelClient;

/// Message sent with the startup chat handshake
pub const HANDSHAKE_TEXT: &str = "Aethel engine bridge online";

/// Prompt sent when probing the code generation endpoint
const CODE_PROBE_PROMPT: &str = "Generate a minimal Unreal actor class that logs its own spawn.";

/// Prompt sent when probing the shader generation endpoint
const SHADER_PROBE_PROMPT: &str = "Generate an unlit pulsing emissive shader.";

/// The Aethel bridge engine module
///
/// Plain struct with `start`/`stop`; the host owns invocation order and
/// timing. `start` must run within a tokio runtime so the startup calls can
/// be submitted without blocking.
pub struct AethelBridgeModule {
    /// Bridge configuration, fixed at construction
    config: BridgeConfig,

    /// Backend client, present between start and stop
    client: Option<AethelClient>,

    /// Handles of the startup dispatches still in flight
    startup: Vec<DispatchHandle>,
}

impl AethelBridgeModule {
    /// Create a module with an explicit configuration
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            client: None,
            startup: Vec::new(),
        }
    }

    /// Create a module by resolving configuration from the given sources
    pub fn from_sources(env: &dyn EnvSource, config: &dyn EngineConfigSource) -> Self {
        Self::new(BridgeConfig::from_sources(env, config))
    }

    /// The backend client, when the module is started
    pub fn client(&self) -> Option<&AethelClient> {
        self.client.as_ref()
    }

    /// The configuration the module was built with
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Wait for every in-flight startup call and collect the outcomes
    ///
    /// The startup path never awaits these itself; this exists for hosts and
    /// tests that need a determinism point after `start`.
    pub async fn join_startup(&mut self) -> Vec<RequestOutcome> {
        let handles: Vec<DispatchHandle> = self.startup.drain(..).collect();
        join_all(handles.into_iter().map(|handle| handle.await_outcome())).await
    }
}

impl EngineModule for AethelBridgeModule {
    fn start(&mut self) {
        info!(
            "starting aethel bridge module, backend {}",
            self.config.base_url
        );

        let client = match AethelClient::new(&self.config) {
            Ok(client) => client,
            Err(e) => {
                // Startup still succeeds; the bridge just stays dark.
                error!("aethel bridge disabled: {}", e);
                return;
            }
        };

        match self.config.startup_calls {
            StartupCalls::ChatHandshake => {
                self.startup.push(client.chat_handshake(HANDSHAKE_TEXT));
            }
            StartupCalls::GenerationProbe => {
                self.startup
                    .push(client.generate_unreal_code(CODE_PROBE_PROMPT));
                self.startup.push(client.generate_shader(SHADER_PROBE_PROMPT));

                if let Err(e) = client.optimize_physics() {
                    warn!("physics optimization skipped: {}", e);
                }
            }
            StartupCalls::None => {}
        }

        self.client = Some(client);
    }

    fn stop(&mut self) {
        info!("stopping aethel bridge module");

        // In-flight requests are not cancelled; their completions still log.
        self.startup.clear();
        self.client = None;
    }
}
