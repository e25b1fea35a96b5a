//! HTTP response building module
//!
//! Builders never panic: a builder error is logged and replaced with a
//! bare response carrying the intended status.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CONTENT_TYPE};
use hyper::{Method, Response, StatusCode};
use serde::Serialize;

#[derive(Serialize)]
struct Health {
    alive: bool,
}

/// Build 404 Not Found response with an empty body
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            bare_response(StatusCode::NOT_FOUND)
        })
}

/// Build 405 Method Not Allowed response with an empty body
///
/// `allowed` becomes the `Allow` header; it is omitted when empty.
pub fn build_405_response(allowed: &[Method]) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(StatusCode::METHOD_NOT_ALLOWED);
    if !allowed.is_empty() {
        builder = builder.header(ALLOW, join_methods(allowed));
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("405", &e);
        bare_response(StatusCode::METHOD_NOT_ALLOWED)
    })
}

/// Build health check response: `{"alive":true}`
pub fn build_health_response() -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(&Health { alive: true }).unwrap_or_default();

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            bare_response(StatusCode::OK)
        })
}

/// Build a fixed response with optional body and content type
pub fn build_direct_response(
    status: StatusCode,
    body: Option<&str>,
    content_type: Option<&str>,
) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(status);
    if let Some(ct) = content_type {
        builder = builder.header(CONTENT_TYPE, ct);
    }

    let body = body.map_or_else(Bytes::new, |b| Bytes::from(b.to_owned()));
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error(status.as_str(), &e);
        bare_response(status)
    })
}

fn join_methods(methods: &[Method]) -> String {
    methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn bare_response(status: StatusCode) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
