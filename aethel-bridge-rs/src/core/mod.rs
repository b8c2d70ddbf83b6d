//! Core abstractions for the Aethel bridge
//!
//! Two seam traits keep the bridge decoupled from its surroundings:
//!
//! - `ServiceClient`: identity of a backend client
//! - `EngineModule`: the host-controlled start/stop lifecycle contract

/// Base trait for backend service clients
pub trait ServiceClient: Send + Sync {
    /// The client name/identifier
    fn name(&self) -> &str;

    /// The normalized base URL the client targets
    fn base_url(&self) -> &str;
}

/// Two-phase lifecycle contract for engine modules
///
/// The host engine owns invocation order and timing; implementors register
/// nothing globally. `start` must return promptly: long-running work belongs
/// on the async runtime, not in the startup path.
pub trait EngineModule {
    /// Called once when the host brings the module up
    fn start(&mut self);

    /// Called once when the host tears the module down
    fn stop(&mut self);
}
