//! Built-in handlers
//!
//! Health check, fixed responses, and the default 404/405 fallbacks.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use std::sync::Arc;

use crate::http;

/// Request handler: consumes the request, produces the full response.
pub type Handler<B> = Arc<dyn Fn(Request<B>) -> Response<Full<Bytes>> + Send + Sync>;

/// Methods registered on a path, attached to the request extensions
/// before a method-not-allowed handler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedMethods(pub Vec<Method>);

pub fn handler_fn<B, F>(f: F) -> Handler<B>
where
    F: Fn(Request<B>) -> Response<Full<Bytes>> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Liveness probe answering `{"alive":true}`
pub fn health_check<B>() -> Handler<B> {
    handler_fn(|_| http::build_health_response())
}

/// Handler that always answers with the same status, body and content type
pub fn direct<B>(status: StatusCode, body: Option<String>, content_type: Option<String>) -> Handler<B> {
    handler_fn(move |_| http::build_direct_response(status, body.as_deref(), content_type.as_deref()))
}

pub fn default_not_found<B>() -> Handler<B> {
    handler_fn(|_| http::build_404_response())
}

pub fn default_method_not_allowed<B>() -> Handler<B> {
    handler_fn(|req: Request<B>| {
        let allowed = req
            .extensions()
            .get::<AllowedMethods>()
            .map_or(&[][..], |a| a.0.as_slice());
        http::build_405_response(allowed)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn request() -> Request<()> {
        Request::builder().uri("/").body(()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check()(request());
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, Bytes::from_static(b"{\"alive\":true}"));
    }

    #[test]
    fn test_default_not_found() {
        let response = default_not_found()(request());
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_default_method_not_allowed_reads_extensions() {
        let mut req = request();
        req.extensions_mut()
            .insert(AllowedMethods(vec![Method::GET, Method::HEAD]));

        let response = default_method_not_allowed()(req);
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["allow"], "GET, HEAD");
    }

    #[test]
    fn test_direct() {
        let handler = direct(StatusCode::ACCEPTED, Some("queued".to_string()), None);
        assert_eq!(handler(request()).status(), StatusCode::ACCEPTED);
        // Reusable across requests
        assert_eq!(handler(request()).status(), StatusCode::ACCEPTED);
    }
}
