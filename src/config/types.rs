// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

use crate::routing::IndexKind;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub shutdown: ShutdownConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Registered routes; the health check alone when absent
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Upper bound for one connection's lifetime, in seconds
    pub connection_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Graceful shutdown configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ShutdownConfig {
    /// Seconds to wait for open connections after a stop signal
    pub grace_period: u64,
}

/// Route storage and fallback configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RoutingConfig {
    #[serde(default)]
    pub index: IndexKind,
    /// Replaces the built-in empty 404
    #[serde(default)]
    pub not_found: Option<RouteAction>,
    /// Replaces the built-in empty 405
    #[serde(default)]
    pub method_not_allowed: Option<RouteAction>,
}

/// One (method, path) registration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    pub method: String,
    pub path: String,
    pub action: RouteAction,
}

/// What a configured route answers with
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteAction {
    /// `{"alive":true}` liveness response
    Health,
    /// Fixed response
    Direct {
        status: u16,
        #[serde(default)]
        body: Option<String>,
        #[serde(default)]
        content_type: Option<String>,
    },
}

fn default_routes() -> Vec<RouteConfig> {
    vec![RouteConfig {
        method: "GET".to_string(),
        path: "/health".to_string(),
        action: RouteAction::Health,
    }]
}
