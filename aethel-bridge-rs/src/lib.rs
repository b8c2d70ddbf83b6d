//! # Aethel Bridge
//!
//! Engine-side bridge to the remote Aethel backend service.
//!
//! This crate provides:
//!
//! - Backend base URL resolution over environment variables and the host
//!   engine's configuration store, with a fixed precedence order
//! - A fire-and-forget request dispatcher for the Aethel endpoints with a
//!   single, centralized completion handler
//! - An engine module implementing the host-controlled start/stop lifecycle
//!
//! ## Architecture
//!
//! The bridge is designed around the following key abstractions:
//!
//! - `EnvSource` / `EngineConfigSource`: explicit lookup seams so resolution
//!   is deterministic under test
//! - `AethelClient`: the request dispatcher with one named operation per
//!   backend endpoint
//! - `RequestOutcome`: the classified result of a single dispatched call
//! - `AethelBridgeModule`: the `start`/`stop` module the host engine owns
//!
//! Backend failures are terminal for the call that produced them: they are
//! logged and discarded, and never propagate into the host's startup path.

// Re-export core abstractions
pub mod core;
pub use crate::core::{EngineModule, ServiceClient};

// Re-export configuration management
pub mod config;
pub use config::{
    normalize_base_url, resolve_base_url, BridgeConfig, EngineConfigSource, EnvSource, MemoryEnv,
    MemoryEngineConfig, NullEngineConfig, ProcessEnv, StartupCalls, DEFAULT_BASE_URL,
};

// Re-export dispatch primitives
pub mod dispatch;
pub use dispatch::{DispatchHandle, RequestContext, RequestOutcome};

// Re-export error handling
pub mod error;
pub use error::{BridgeError, Result};

// Re-export service clients
pub mod services;
pub use services::aethel::{AethelClient, AethelClientBuilder};

// Engine module wiring
pub mod module;
pub use module::AethelBridgeModule;

// Utility module for common functionality
mod util;

#[cfg(test)]
mod tests;

/// Create a new default client builder
pub fn client() -> AethelClientBuilder {
    AethelClientBuilder::new()
}

/// Create a bridge module configured from the process environment
pub fn bridge_module() -> AethelBridgeModule {
    AethelBridgeModule::new(BridgeConfig::from_process_env())
}
