//! Minimal HTTP request router
//!
//! Routes are registered as exact (method, path) pairs and stored in a
//! segment trie. A request resolves to its handler, or to the not-found
//! or method-not-allowed fallback.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
