// Application state module
// Shared, read-only state handed to every connection task

use hyper::body::Incoming;
use std::sync::atomic::AtomicUsize;

use super::types::Config;
use crate::handler::Router;

/// Application state
///
/// Built once the router is complete. It is only ever shared behind an
/// `Arc`, so the router can no longer be mutated while serving.
pub struct AppState {
    pub config: Config,
    pub router: Router<Incoming>,
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub const fn new(config: Config, router: Router<Incoming>) -> Self {
        Self {
            config,
            router,
            active_connections: AtomicUsize::new(0),
        }
    }

    /// Access log format when access logging is enabled
    pub fn access_log_format(&self) -> Option<&str> {
        self.config.access_log_format()
    }
}
