//! Configuration management for the Aethel bridge
//!
//! This module owns base URL resolution: the precedence chain over
//! environment variables and the host engine's configuration store, plus the
//! normalization applied to every candidate value. Both lookup sides are
//! traits so resolution stays deterministic in tests without touching the
//! process environment.

use std::collections::HashMap;
use std::env;

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Primary environment variable override for the backend base URL
pub const ENV_PRIMARY: &str = "AETHEL_API_BASE";

/// Fallback environment variable, shared convention with the web front-end
pub const ENV_FALLBACK: &str = "NEXT_PUBLIC_API_URL";

/// Section in the engine configuration store holding bridge settings
pub const CONFIG_SECTION: &str = "Aethel";

/// Key under [`CONFIG_SECTION`] holding the backend base URL
pub const CONFIG_KEY: &str = "ApiBaseUrl";

/// Hardcoded local default used when no source provides a value
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Read side of the process environment
pub trait EnvSource: Send + Sync {
    /// Get an environment variable, `None` when unset or unreadable
    fn var(&self, name: &str) -> Option<String>;
}

/// [`EnvSource`] backed by the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// In-memory [`EnvSource`] for testing or static configuration
#[derive(Debug, Clone, Default)]
pub struct MemoryEnv {
    values: HashMap<String, String>,
}

impl MemoryEnv {
    /// Create a new empty memory environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable
    pub fn set<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: ToString,
    {
        self.values.insert(name.into(), value.to_string());
    }
}

impl EnvSource for MemoryEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Read side of the host engine's configuration store
///
/// The engine's own file format and parser are opaque to the bridge; the host
/// hands over whatever implements this trait.
pub trait EngineConfigSource: Send + Sync {
    /// Get a value by section and key, `None` when absent
    fn value(&self, section: &str, key: &str) -> Option<String>;
}

/// [`EngineConfigSource`] for hosts without a configuration store
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEngineConfig;

impl EngineConfigSource for NullEngineConfig {
    fn value(&self, _section: &str, _key: &str) -> Option<String> {
        None
    }
}

/// In-memory [`EngineConfigSource`] for testing or host-populated snapshots
#[derive(Debug, Clone, Default)]
pub struct MemoryEngineConfig {
    values: HashMap<(String, String), String>,
}

impl MemoryEngineConfig {
    /// Create a new empty config store
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value under a section and key
    pub fn set<S, K, V>(&mut self, section: S, key: K, value: V)
    where
        S: Into<String>,
        K: Into<String>,
        V: ToString,
    {
        self.values
            .insert((section.into(), key.into()), value.to_string());
    }
}

impl EngineConfigSource for MemoryEngineConfig {
    fn value(&self, section: &str, key: &str) -> Option<String> {
        self.values
            .get(&(section.to_string(), key.to_string()))
            .cloned()
    }
}

/// Normalize a candidate base URL
///
/// Surrounding whitespace and every trailing `/` are removed. Trailing runs
/// of slashes and whitespace are stripped together, so the result is a fixed
/// point: normalizing a normalized string yields the same string. No scheme
/// or host validation happens here; malformed URLs surface later as
/// transport failures.
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(|c: char| c == '/' || c.is_whitespace())
        .to_string()
}

/// Treat blank values as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolve the backend base URL
///
/// Total with respect to its inputs: always returns a normalized URL, never
/// fails. Precedence, highest first: [`ENV_PRIMARY`], [`ENV_FALLBACK`], the
/// engine configuration value `[Aethel] ApiBaseUrl`, then
/// [`DEFAULT_BASE_URL`]. Values that are empty or whitespace-only fall
/// through to the next source.
pub fn resolve_base_url(env: &dyn EnvSource, config: &dyn EngineConfigSource) -> String {
    if let Some(value) = non_blank(env.var(ENV_PRIMARY)) {
        debug!("aethel base url taken from {}", ENV_PRIMARY);
        return normalize_base_url(&value);
    }

    if let Some(value) = non_blank(env.var(ENV_FALLBACK)) {
        debug!("aethel base url taken from {}", ENV_FALLBACK);
        return normalize_base_url(&value);
    }

    if let Some(value) = non_blank(config.value(CONFIG_SECTION, CONFIG_KEY)) {
        debug!(
            "aethel base url taken from engine config [{}] {}",
            CONFIG_SECTION, CONFIG_KEY
        );
        return normalize_base_url(&value);
    }

    info!(
        "no aethel backend configured, using default {}",
        DEFAULT_BASE_URL
    );
    DEFAULT_BASE_URL.to_string()
}

/// Which backend calls the bridge fires on module startup
///
/// The two variants mirror the two historical shapes of the plugin: one
/// opened with a chat handshake, the other probed the generation endpoints.
/// Both remain available; hosts pick one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartupCalls {
    /// Send the `/chat` handshake message
    ChatHandshake,
    /// Probe the code and shader generation endpoints
    GenerationProbe,
    /// Start quietly, no backend traffic
    None,
}

impl Default for StartupCalls {
    fn default() -> Self {
        StartupCalls::ChatHandshake
    }
}

/// Resolved bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Normalized backend base URL
    pub base_url: String,

    /// Request timeout in seconds; `None` inherits the transport default
    pub timeout_seconds: Option<u64>,

    /// Startup call selection
    pub startup_calls: StartupCalls,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
            startup_calls: StartupCalls::default(),
        }
    }
}

impl BridgeConfig {
    /// Build a configuration by resolving the base URL from the given sources
    pub fn from_sources(env: &dyn EnvSource, config: &dyn EngineConfigSource) -> Self {
        Self {
            base_url: resolve_base_url(env, config),
            ..Self::default()
        }
    }

    /// Build a configuration from the process environment alone
    pub fn from_process_env() -> Self {
        Self::from_sources(&ProcessEnv, &NullEngineConfig)
    }
}
