// Configuration module entry point
// Loads layered configuration and turns the configured routes into a router

mod state;
mod types;

use hyper::{Method, StatusCode};
use std::net::SocketAddr;
use thiserror::Error;

use crate::handler::{self, Handler, Router};

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, LoggingConfig, PerformanceConfig, RouteAction, RouteConfig, RoutingConfig,
    ServerConfig, ShutdownConfig,
};

/// A configured route that cannot be registered
#[derive(Debug, Error)]
pub enum RouteConfigError {
    #[error("invalid method '{method}' for route {path}")]
    InvalidMethod { method: String, path: String },
    #[error("invalid status {status} in {context}")]
    InvalidStatus { status: u16, context: String },
}

impl Config {
    /// Load configuration from specified file path (extension optional)
    ///
    /// Sources, lowest priority first: built-in defaults, the file (optional),
    /// `ROUTER__*` environment variables, then `port_override`.
    pub fn load_from(
        config_path: &str,
        port_override: Option<u16>,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 30)?
            .set_default("shutdown.grace_period", 60)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("ROUTER")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("server.port", port_override.map(i64::from))?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Access log format when access logging is enabled
    pub fn access_log_format(&self) -> Option<&str> {
        self.logging
            .access_log
            .then_some(self.logging.access_log_format.as_str())
    }

    /// Build the router for the configured routes and fallbacks
    pub fn build_router<B: 'static>(&self) -> Result<Router<B>, RouteConfigError> {
        let mut router = Router::with_index(self.routing.index);

        for route in &self.routes {
            let method = Method::from_bytes(route.method.as_bytes()).map_err(|_| {
                RouteConfigError::InvalidMethod {
                    method: route.method.clone(),
                    path: route.path.clone(),
                }
            })?;
            let context = format!("route {} {}", route.method, route.path);
            router.register(method, &route.path, build_handler(&route.action, &context)?);
        }

        if let Some(action) = &self.routing.not_found {
            router.set_not_found(build_handler(action, "routing.not_found")?);
        }
        if let Some(action) = &self.routing.method_not_allowed {
            router.set_method_not_allowed(build_handler(action, "routing.method_not_allowed")?);
        }

        Ok(router)
    }
}

fn build_handler<B>(action: &RouteAction, context: &str) -> Result<Handler<B>, RouteConfigError> {
    match action {
        RouteAction::Health => Ok(handler::health_check()),
        RouteAction::Direct {
            status,
            body,
            content_type,
        } => {
            let code = StatusCode::from_u16(*status).map_err(|_| RouteConfigError::InvalidStatus {
                status: *status,
                context: context.to_string(),
            })?;
            Ok(handler::direct(code, body.clone(), content_type.clone()))
        }
    }
}
