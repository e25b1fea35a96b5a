//! Request dispatch module
//!
//! Entry point for HTTP request processing: resolves the route, then runs
//! the matched handler or the not-found / method-not-allowed fallback.
//!
//! A router is mutated only while it is being built. The server wraps the
//! finished router in an `Arc`, after which it is shared read-only by every
//! connection task, so registration can never race with dispatch.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, REFERER, USER_AGENT};
use hyper::{Method, Request, Response, Version};
use std::net::SocketAddr;
use std::time::Instant;

use super::builtin::{self, AllowedMethods, Handler};
use crate::logger::{self, AccessLogEntry};
use crate::routing::{IndexKind, Route, RouteError, RouteTable};

pub struct Router<B> {
    table: RouteTable<Handler<B>>,
    not_found: Handler<B>,
    method_not_allowed: Handler<B>,
}

impl<B: 'static> Router<B> {
    pub fn new() -> Self {
        Self::with_index(IndexKind::default())
    }

    pub fn with_index(kind: IndexKind) -> Self {
        Self {
            table: RouteTable::with_kind(kind),
            not_found: builtin::default_not_found(),
            method_not_allowed: builtin::default_method_not_allowed(),
        }
    }

    /// Build a router from a route list and an optional not-found handler
    pub fn from_routes(
        routes: impl IntoIterator<Item = Route<Handler<B>>>,
        not_found: Option<Handler<B>>,
    ) -> Self {
        let mut router = Self::new();
        router.table.extend(routes);
        if let Some(handler) = not_found {
            router.not_found = handler;
        }
        router
    }

    /// Register `handler` for `method` on the exact path `pattern`.
    ///
    /// A second registration of the same pair replaces the first.
    pub fn register(&mut self, method: Method, pattern: &str, handler: Handler<B>) {
        self.table.register(method, pattern, handler);
    }

    /// Builder form of [`Router::register`]
    #[must_use]
    pub fn route(mut self, method: Method, pattern: &str, handler: Handler<B>) -> Self {
        self.register(method, pattern, handler);
        self
    }

    pub fn set_not_found(&mut self, handler: Handler<B>) {
        self.not_found = handler;
    }

    pub fn set_method_not_allowed(&mut self, handler: Handler<B>) {
        self.method_not_allowed = handler;
    }

    pub fn resolve(&self, method: &Method, path: &str) -> Result<&Handler<B>, RouteError> {
        self.table.resolve(method, path)
    }

    pub const fn route_count(&self) -> usize {
        self.table.len()
    }

    /// Run exactly one handler for the request and return its response.
    pub fn dispatch(&self, mut req: Request<B>) -> Response<Full<Bytes>> {
        match self.resolve(req.method(), req.uri().path()) {
            Ok(handler) => {
                log_outcome(&req, "dispatched");
                handler(req)
            }
            Err(RouteError::NotFound) => {
                log_outcome(&req, "not_found");
                (self.not_found)(req)
            }
            Err(RouteError::MethodNotAllowed { allowed }) => {
                log_outcome(&req, "method_not_allowed");
                req.extensions_mut().insert(AllowedMethods(allowed));
                (self.method_not_allowed)(req)
            }
        }
    }
}

impl<B: 'static> Default for Router<B> {
    fn default() -> Self {
        Self::new()
    }
}

fn log_outcome<B>(req: &Request<B>, outcome: &str) {
    logger::log_debug(format_args!(
        "[Route] {} {} -> {outcome}",
        req.method(),
        req.uri().path()
    ));
}

/// Dispatch one request and write its access log line.
///
/// `access_log_format` is `None` when access logging is disabled.
pub fn handle_request<B: 'static>(
    router: &Router<B>,
    req: Request<B>,
    peer_addr: SocketAddr,
    access_log_format: Option<&str>,
) -> Response<Full<Bytes>> {
    let Some(format) = access_log_format else {
        return router.dispatch(req);
    };

    let started = Instant::now();
    let mut entry = access_entry(&req, peer_addr);
    let response = router.dispatch(req);

    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    logger::log_access(&entry, format);

    response
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.referer = header_value(req, &REFERER);
    entry.user_agent = header_value(req, &USER_AGENT);
    entry
}

fn header_value<B>(req: &Request<B>, name: &HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
