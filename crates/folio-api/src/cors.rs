//! Permissive CORS headers for the contact endpoint.
//!
//! The portfolio front-end may be served from a different origin than the API,
//! so every response carries the same fixed set of headers. That includes
//! errors and preflight replies.

use axum::{
  Router,
  http::{HeaderName, HeaderValue, header},
};
use tower_http::set_header::SetResponseHeaderLayer;

const CORS_HEADERS: [(HeaderName, &str); 4] = [
  (header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"),
  (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
  (header::ACCESS_CONTROL_ALLOW_METHODS, "GET,POST,OPTIONS"),
  (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

/// Wrap every route of `router` so its responses carry the CORS headers.
pub fn with_cors<S>(router: Router<S>) -> Router<S>
where
  S: Clone + Send + Sync + 'static,
{
  CORS_HEADERS.into_iter().fold(router, |router, (name, value)| {
    router.layer(SetResponseHeaderLayer::overriding(
      name,
      HeaderValue::from_static(value),
    ))
  })
}
