//! Cross-cutting request handling: access logging and CORS.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, Method, StatusCode, header},
    middleware::Next,
    response::Response,
};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, debug, enabled, info};

use super::error::error_response;

/// How long browsers may cache a preflight answer.
pub const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86_400);

/// CORS policy accepting every origin, including `null` origins from `file://` pages.
#[must_use]
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
            Method::HEAD,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
            header::ACCEPT,
            header::ORIGIN,
        ])
        .expose_headers([header::CONTENT_LENGTH, header::CONTENT_TYPE])
        .max_age(PREFLIGHT_MAX_AGE)
}

/// Answers `OPTIONS` requests with `204 No Content`, keeping the CORS headers.
///
/// Must wrap the CORS layer so that it sees the preflight response produced there.
pub async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_preflight = request.method() == Method::OPTIONS;
    let response = next.run(request).await;
    if !is_preflight {
        return response;
    }

    let (mut parts, _body) = response.into_parts();
    parts.status = StatusCode::NO_CONTENT;
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.remove(header::CONTENT_TYPE);
    Response::from_parts(parts, Body::empty())
}

/// Characters of a JSON request body shown in the debug log.
pub const BODY_PREVIEW_CHARS: usize = 100;

/// Largest body buffered for the debug preview; matches axum's default JSON limit.
const MAX_PREVIEW_BODY_BYTES: usize = 2 * 1024 * 1024;

/// First [`BODY_PREVIEW_CHARS`] characters of `bytes`, lossily decoded.
#[must_use]
pub fn body_preview(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .take(BODY_PREVIEW_CHARS)
        .collect()
}

fn is_json(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Logs every incoming request with its origin, and its status once handled.
///
/// At debug level a non-empty JSON body is previewed; the body is buffered and
/// handed on unchanged.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("N/A")
        .to_string();
    info!(%method, %path, %origin, "Incoming request");

    let request = if enabled!(Level::DEBUG) && is_json(&request) {
        let (parts, body) = request.into_parts();
        let Ok(bytes) = axum::body::to_bytes(body, MAX_PREVIEW_BODY_BYTES).await else {
            debug!(%method, %path, "Request body unreadable or too large");
            return error_response(StatusCode::BAD_REQUEST, "Could not read request body");
        };
        if !bytes.is_empty() {
            debug!(%method, %path, body = %body_preview(&bytes), "Request body");
        }
        Request::from_parts(parts, Body::from(bytes))
    } else {
        request
    };

    let response = next.run(request).await;
    debug!(%method, %path, status = %response.status(), "Request completed");
    response
}
